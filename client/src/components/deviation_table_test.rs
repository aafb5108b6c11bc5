use super::*;

use leptos::tachys::view::RenderHtml;

use crate::net::types::decode_analysis_response;
use crate::state::results::deviation_rows;

fn two_deviation_rows() -> Vec<DeviationRow> {
    let body = serde_json::json!({
        "summary": {
            "risk_level": "Medium",
            "total_deviations": 2,
            "change_percentage": 12.5,
            "changed_area_pixels": 3400
        },
        "images": {
            "overlay": "b3ZlcmxheQ==",
            "heatmap": "aGVhdG1hcA==",
            "difference": "ZGlmZg==",
            "annotated_reference": "cmVm",
            "annotated_current": "Y3Vy"
        },
        "deviations": [
            {"id": "D1", "type": "Boundary Deviation", "severity": "Medium", "area_pixels": 2400,
             "bbox": {"x": 10, "y": 20, "width": 50, "height": 60}},
            {"id": "D2", "type": "Minor Change", "severity": "Low", "area_pixels": 1000,
             "bbox": {"x": 300, "y": 40, "width": 25, "height": 40}}
        ]
    });
    deviation_rows(&decode_analysis_response(&body.to_string()).unwrap())
}

fn render(flagged: &[&str]) -> String {
    let owner = Owner::new();
    owner.with(|| {
        let mut initial = ReviewFlags::default();
        for id in flagged {
            initial.toggle(id);
        }
        let flags = RwSignal::new(initial);
        view! { <DeviationTable rows=two_deviation_rows() flags=flags/> }.to_html()
    })
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn renders_one_body_row_per_deviation() {
    let html = render(&[]);
    // Header row plus one row per deviation.
    assert_eq!(html.matches("<tr").count(), 3);
    assert!(html.contains("D1"));
    assert!(html.contains("Boundary Deviation"));
    assert!(html.contains("Minor Change"));
    assert!(html.find("D1").unwrap() < html.find("D2").unwrap());
}

#[test]
fn every_row_offers_a_review_flag() {
    let html = render(&[]);
    assert_eq!(html.matches("Flag for Review").count(), 2);
    assert!(!html.contains("flagged for review"));
}

#[test]
fn flagged_rows_show_their_state_and_header_count() {
    let html = render(&["D2"]);
    assert_eq!(html.matches("Flag for Review").count(), 1);
    assert!(html.contains("Flagged"));
    assert!(html.contains("1 flagged for review"));
}
