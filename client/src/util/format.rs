//! Display formatting for counts, areas, percentages, and file sizes.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::BoundingBox;

/// Placeholder for values the service did not provide.
pub const MISSING: &str = "—";

/// Group digits in thousands: `1234567` -> `"1,234,567"`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"(x, y) - width×height"`.
pub fn format_bbox(bbox: &BoundingBox) -> String {
    format!("({}, {}) - {}×{}", bbox.x, bbox.y, bbox.width, bbox.height)
}

/// Percentage exactly as reported, e.g. `12.5%` or `4%`.
pub fn format_percentage(pct: f64) -> String {
    format!("{pct}%")
}

/// Share of the area that did not change, one decimal: `12.5` -> `"87.5%"`.
pub fn format_unchanged_percentage(changed_pct: f64) -> String {
    format!("{:.1}%", (100.0 - changed_pct).clamp(0.0, 100.0))
}

/// File size in kilobytes with one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn format_kb(size_bytes: u64) -> String {
    format!("{:.1} KB", size_bytes as f64 / 1024.0)
}

pub fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

pub fn count_or_missing(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_owned(), group_digits)
}

pub fn percentage_or_missing(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_owned(), format_percentage)
}
