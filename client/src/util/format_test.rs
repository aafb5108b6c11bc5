use super::*;

#[test]
fn group_digits_inserts_thousands_separators() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(1000), "1,000");
    assert_eq!(group_digits(3400), "3,400");
    assert_eq!(group_digits(1_234_567), "1,234,567");
    assert_eq!(group_digits(100_000), "100,000");
}

#[test]
fn format_bbox_matches_location_column() {
    let bbox = BoundingBox { x: 10, y: 20, width: 50, height: 60 };
    assert_eq!(format_bbox(&bbox), "(10, 20) - 50×60");
}

#[test]
fn format_percentage_keeps_reported_precision() {
    assert_eq!(format_percentage(12.5), "12.5%");
    assert_eq!(format_percentage(4.0), "4%");
    assert_eq!(format_percentage(0.37), "0.37%");
}

#[test]
fn unchanged_percentage_is_complement_with_one_decimal() {
    assert_eq!(format_unchanged_percentage(12.5), "87.5%");
    assert_eq!(format_unchanged_percentage(0.0), "100.0%");
    assert_eq!(format_unchanged_percentage(100.0), "0.0%");
    assert_eq!(format_unchanged_percentage(33.33), "66.7%");
}

#[test]
fn format_kb_uses_one_decimal() {
    assert_eq!(format_kb(0), "0.0 KB");
    assert_eq!(format_kb(1024), "1.0 KB");
    assert_eq!(format_kb(1536), "1.5 KB");
}

#[test]
fn missing_values_render_as_dash() {
    assert_eq!(or_missing(None), MISSING);
    assert_eq!(or_missing(Some("  ")), MISSING);
    assert_eq!(or_missing(Some("2024-01-15")), "2024-01-15");
    assert_eq!(count_or_missing(None), MISSING);
    assert_eq!(count_or_missing(Some(12_000)), "12,000");
    assert_eq!(percentage_or_missing(Some(7.5)), "7.5%");
    assert_eq!(percentage_or_missing(None), MISSING);
}
