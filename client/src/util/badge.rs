//! Badge and accent classes for categorical values.
//!
//! Severity and risk level share one palette: each of the four known levels
//! maps to exactly one class and one accent color. Anything else falls back
//! to the neutral `info` styling.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use crate::net::types::Severity;

/// Badge class for a severity or risk level.
pub fn severity_badge_class(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "badge badge-critical",
        Severity::High => "badge badge-high",
        Severity::Medium => "badge badge-medium",
        Severity::Low => "badge badge-low",
        Severity::Other(_) => "badge badge-info",
    }
}

/// Class of the risk banner container.
pub fn risk_meter_class(risk: &Severity) -> &'static str {
    match risk {
        Severity::Critical => "risk-meter critical",
        Severity::High => "risk-meter high",
        Severity::Medium => "risk-meter medium",
        Severity::Low => "risk-meter low",
        Severity::Other(_) => "risk-meter info",
    }
}

/// CSS color for risk banner text.
pub fn risk_color(risk: &Severity) -> &'static str {
    match risk {
        Severity::Critical => "var(--accent-red)",
        Severity::High => "var(--accent-amber)",
        Severity::Medium => "var(--accent-purple)",
        Severity::Low => "var(--accent-green)",
        Severity::Other(_) => "var(--text-secondary)",
    }
}

/// Badge class for a plot's compliance status.
pub fn plot_status_badge_class(status: &str) -> &'static str {
    if status == "Compliant" {
        "badge badge-compliant"
    } else if status.contains("Encroachment") || status.contains("Unauthorized") {
        "badge badge-critical"
    } else if status.contains("Vacant") {
        "badge badge-warning"
    } else if status.contains("Boundary") {
        "badge badge-high"
    } else {
        "badge badge-info"
    }
}

/// Lease status label; missing reads as `Active`.
pub fn lease_status_label(lease_status: Option<&str>) -> &str {
    lease_status.filter(|s| !s.trim().is_empty()).unwrap_or("Active")
}

pub fn lease_badge_class(lease_status: Option<&str>) -> &'static str {
    if lease_status == Some("Dues Pending") { "badge badge-warning" } else { "badge badge-compliant" }
}
