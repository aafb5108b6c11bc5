use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::net::types::Severity;
use crate::state::analysis::{CONNECTIVITY_MESSAGE, ErrorKind, MALFORMED_RESPONSE_MESSAGE};
use crate::state::upload::{SelectedFile, StagedImage};

// =============================================================
// Helpers
// =============================================================

const JPEG_B64: &str = "/9j/4AAQSkZJRg==";

/// Replays one scripted outcome and records every call.
#[derive(Clone)]
struct ScriptedTransport {
    outcome: Result<RawResponse, TransportError>,
    calls: Rc<Cell<usize>>,
    urls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedTransport {
    fn new(outcome: Result<RawResponse, TransportError>) -> Self {
        Self { outcome, calls: Rc::default(), urls: Rc::default() }
    }

    fn respond(status: u16, body: &str) -> Self {
        Self::new(Ok(RawResponse { status, body: body.to_owned() }))
    }
}

impl AnalysisTransport for ScriptedTransport {
    async fn post_analysis(&self, url: &str, _request: &AnalysisRequest) -> Result<RawResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.urls.borrow_mut().push(url.to_owned());
        self.outcome.clone()
    }
}

fn request() -> AnalysisRequest {
    let stage = |name: &str| {
        StagedImage::accept(SelectedFile::from_bytes(name, "image/jpeg", &[0xFF, 0xD8])).unwrap()
    };
    AnalysisRequest { reference: stage("ref.jpg"), current: stage("cur.jpg") }
}

fn success_body() -> String {
    serde_json::json!({
        "result_id": "a1b2c3d4",
        "summary": {
            "risk_level": "High",
            "total_deviations": 2,
            "change_percentage": 12.5,
            "changed_area_pixels": 5000
        },
        "images": {
            "overlay": JPEG_B64,
            "heatmap": JPEG_B64,
            "difference": JPEG_B64,
            "annotated_reference": JPEG_B64,
            "annotated_current": JPEG_B64
        },
        "deviations": [
            {"id": "D1", "type": "Boundary Deviation", "severity": "High", "area_pixels": 3000,
             "bbox": {"x": 10, "y": 20, "width": 50, "height": 60}},
            {"id": "D2", "type": "Minor Change", "severity": "Low", "area_pixels": 2000,
             "bbox": {"x": 100, "y": 120, "width": 30, "height": 40}}
        ]
    })
    .to_string()
}

fn submit(transport: &ScriptedTransport) -> Result<AnalysisResult, ErrorInfo> {
    let submitter = AnalysisSubmitter::new(ApiConfig::new("http://svc:8000/", true), transport.clone());
    futures::executor::block_on(submitter.submit(&request()))
}

// =============================================================
// Success
// =============================================================

#[test]
fn success_response_yields_decoded_result() {
    let transport = ScriptedTransport::respond(200, &success_body());
    let result = submit(&transport).unwrap();

    assert_eq!(result.summary.risk_level, Severity::High);
    assert_eq!(result.summary.total_deviations, 2);
    assert_eq!(result.deviations.len(), 2);
    assert_eq!(result.deviations[0].id, "D1");
}

#[test]
fn submit_posts_once_to_analyze_endpoint() {
    let transport = ScriptedTransport::respond(200, &success_body());
    let _ = submit(&transport);

    assert_eq!(transport.calls.get(), 1);
    assert_eq!(*transport.urls.borrow(), vec!["http://svc:8000/api/analyze".to_owned()]);
}

#[test]
fn any_2xx_status_is_treated_as_success() {
    let transport = ScriptedTransport::respond(201, &success_body());
    assert!(submit(&transport).is_ok());
}

// =============================================================
// Failures
// =============================================================

#[test]
fn server_detail_is_surfaced_verbatim() {
    let transport = ScriptedTransport::respond(400, r#"{"detail":"Failed to load images"}"#);
    let err = submit(&transport).unwrap_err();
    assert_eq!(err, ErrorInfo::server("Failed to load images"));
}

#[test]
fn validation_detail_list_is_joined() {
    let body = r#"{"detail":[{"loc":["body","current"],"msg":"field required"}]}"#;
    let err = submit(&ScriptedTransport::respond(422, body)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.message, "field required");
}

#[test]
fn failure_without_detail_uses_generic_message() {
    for body in ["", "<html>bad gateway</html>", r#"{"error":"x"}"#, r#"{"detail":""}"#] {
        let err = submit(&ScriptedTransport::respond(502, body)).unwrap_err();
        assert_eq!(err, ErrorInfo::server(GENERIC_FAILURE_MESSAGE), "body: {body}");
    }
}

#[test]
fn success_status_with_malformed_body_is_server_failure() {
    let err = submit(&ScriptedTransport::respond(200, r#"{"summary":{}}"#)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.message, MALFORMED_RESPONSE_MESSAGE);
}

#[test]
fn success_status_with_out_of_range_percentage_is_server_failure() {
    let body = success_body().replace("12.5", "140.0");
    let err = submit(&ScriptedTransport::respond(200, &body)).unwrap_err();
    assert_eq!(err, ErrorInfo::malformed_response());
}

#[test]
fn transport_error_is_connectivity_failure() {
    let transport = ScriptedTransport::new(Err(TransportError("connection refused".to_owned())));
    let err = submit(&transport).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Connectivity);
    assert_eq!(err.message, CONNECTIVITY_MESSAGE);
    assert_eq!(transport.calls.get(), 1);
}

#[test]
fn raw_response_success_range() {
    let status = |s| RawResponse { status: s, body: String::new() };
    assert!(status(200).is_success());
    assert!(status(299).is_success());
    assert!(!status(199).is_success());
    assert!(!status(300).is_success());
    assert!(!status(500).is_success());
}
