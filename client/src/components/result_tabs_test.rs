use super::*;

use leptos::tachys::view::RenderHtml;

use crate::net::types::decode_analysis_response;

fn analysis() -> AnalysisResult {
    let body = serde_json::json!({
        "summary": {
            "risk_level": "Medium",
            "total_deviations": 0,
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
        "deviations": []
    });
    decode_analysis_response(&body.to_string()).unwrap()
}

fn render(selected: ResultTab) -> String {
    let owner = Owner::new();
    owner.with(|| {
        let tab = RwSignal::new(selected);
        view! { <ResultTabs result=analysis() tab=tab/> }.to_html()
    })
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn renders_a_button_per_tab() {
    let html = render(ResultTab::Overlay);
    for t in ResultTab::ALL {
        assert!(html.contains(t.label()), "missing tab {}", t.label());
    }
}

#[test]
fn overlay_tab_shows_single_panel() {
    let html = render(ResultTab::Overlay);
    assert_eq!(html.matches("<img").count(), 1);
    assert!(html.contains("data:image/jpeg;base64,b3ZlcmxheQ=="));
}

#[test]
fn annotated_tab_shows_reference_and_current_side_by_side() {
    let html = render(ResultTab::Annotated);
    assert_eq!(html.matches("<img").count(), 2);
    assert!(html.contains("data:image/jpeg;base64,cmVm"));
    assert!(html.contains("data:image/jpeg;base64,Y3Vy"));
    assert!(html.contains("Reference Map (with deviation regions)"));
    assert!(html.contains("Current Image (with deviation regions)"));
    assert!(html.contains("results-grid"));
}
