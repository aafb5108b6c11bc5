use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::net::analyze::{AnalysisSubmitter, AnalysisTransport, RawResponse, TransportError};
use crate::net::api::ApiConfig;
use crate::net::types::decode_analysis_response;
use crate::state::upload::StagedImage;

// =============================================================
// Helpers
// =============================================================

const JPEG_B64: &str = "/9j/4AAQSkZJRg==";

#[derive(Clone, Debug, Default)]
struct CountingPreviews {
    live: Rc<Cell<i32>>,
}

impl PreviewProvider for CountingPreviews {
    fn acquire(&self, image: &StagedImage) -> Option<String> {
        self.live.set(self.live.get() + 1);
        Some(format!("blob:{}", image.name))
    }

    fn release(&self, _url: &str) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Clone)]
struct CountingTransport {
    outcome: Result<RawResponse, TransportError>,
    calls: Rc<Cell<usize>>,
}

impl AnalysisTransport for CountingTransport {
    async fn post_analysis(&self, _url: &str, _request: &AnalysisRequest) -> Result<RawResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

fn submitter(outcome: Result<RawResponse, TransportError>) -> (AnalysisSubmitter<CountingTransport>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let transport = CountingTransport { outcome, calls: calls.clone() };
    (AnalysisSubmitter::new(ApiConfig::default(), transport), calls)
}

fn result_body(risk: &str, deviations: usize) -> String {
    let items: Vec<serde_json::Value> = (1..=deviations)
        .map(|i| {
            serde_json::json!({
                "id": format!("D{i}"),
                "type": "Boundary Deviation",
                "severity": "High",
                "area_pixels": 100 * i,
                "bbox": {"x": i, "y": i, "width": 10, "height": 10}
            })
        })
        .collect();
    serde_json::json!({
        "summary": {
            "risk_level": risk,
            "total_deviations": deviations,
            "change_percentage": 4.25,
            "changed_area_pixels": 900
        },
        "images": {
            "overlay": JPEG_B64,
            "heatmap": JPEG_B64,
            "difference": JPEG_B64,
            "annotated_reference": JPEG_B64,
            "annotated_current": JPEG_B64
        },
        "deviations": items
    })
    .to_string()
}

fn sample_result() -> AnalysisResult {
    decode_analysis_response(&result_body("Medium", 1)).unwrap()
}

fn jpeg(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, "image/jpeg", &[0xFF, 0xD8, 0xFF])
}

fn staged_workflow() -> AnalysisWorkflow<CountingPreviews> {
    let mut workflow = AnalysisWorkflow::new(CountingPreviews::default());
    workflow.set_slot(SlotId::Reference, jpeg("reference.jpg"));
    workflow.set_slot(SlotId::Current, jpeg("current.jpg"));
    workflow
}

/// Full submit cycle the way the analyze page drives it.
fn run<T: AnalysisTransport>(
    workflow: &mut AnalysisWorkflow<CountingPreviews>,
    submitter: &AnalysisSubmitter<T>,
) -> Result<bool, SubmitRejected> {
    let Submission { ticket, request } = workflow.begin_submission()?;
    let outcome = futures::executor::block_on(submitter.submit(&request));
    Ok(workflow.finish_submission(&ticket, outcome))
}

// =============================================================
// Submission outcomes
// =============================================================

#[test]
fn successful_submission_reaches_ready_and_keeps_slots() {
    let mut workflow = staged_workflow();
    let (submitter, calls) = submitter(Ok(RawResponse { status: 200, body: result_body("High", 2) }));

    assert_eq!(run(&mut workflow, &submitter), Ok(true));

    let result = workflow.state().result().unwrap();
    assert_eq!(result.summary.risk_level.label(), "High");
    assert_eq!(result.deviations.len(), 2);
    assert_eq!(calls.get(), 1);
    assert!(workflow.can_submit());
    assert_eq!(workflow.staging().slot(SlotId::Reference).unwrap().image().name, "reference.jpg");
}

#[test]
fn server_failure_reaches_failed_with_detail() {
    let mut workflow = staged_workflow();
    let body = r#"{"detail":"Failed to load images"}"#.to_owned();
    let (submitter, _) = submitter(Ok(RawResponse { status: 400, body }));

    run(&mut workflow, &submitter).unwrap();

    let error = workflow.state().error().unwrap();
    assert_eq!(error.kind, ErrorKind::Server);
    assert_eq!(error.message, "Failed to load images");
    assert!(workflow.state().result().is_none());
}

#[test]
fn unreachable_service_reaches_failed_with_guidance() {
    let mut workflow = staged_workflow();
    let (submitter, _) = submitter(Err(TransportError("refused".to_owned())));

    run(&mut workflow, &submitter).unwrap();

    assert_eq!(workflow.state(), &AnalysisState::Failed(ErrorInfo::connectivity()));
}

#[test]
fn failed_state_allows_retry_with_same_slots() {
    let mut workflow = staged_workflow();
    let (failing, _) = submitter(Err(TransportError("offline".to_owned())));
    run(&mut workflow, &failing).unwrap();
    assert!(workflow.submit_enabled());

    let (working, calls) = submitter(Ok(RawResponse { status: 200, body: result_body("Low", 0) }));
    run(&mut workflow, &working).unwrap();

    assert!(workflow.state().result().is_some());
    assert_eq!(calls.get(), 1);
}

// =============================================================
// Preconditions
// =============================================================

#[test]
fn begin_requires_both_images() {
    let mut workflow = AnalysisWorkflow::new(CountingPreviews::default());
    assert_eq!(workflow.begin_submission().unwrap_err(), SubmitRejected::MissingImages);

    workflow.set_slot(SlotId::Reference, jpeg("reference.jpg"));
    assert_eq!(workflow.begin_submission().unwrap_err(), SubmitRejected::MissingImages);
    assert_eq!(workflow.state(), &AnalysisState::Idle);
    assert!(!workflow.submit_enabled());
}

#[test]
fn second_submit_while_analyzing_is_rejected_without_exchange() {
    let mut workflow = staged_workflow();
    let (submitter, calls) = submitter(Ok(RawResponse { status: 200, body: result_body("Low", 0) }));

    let first = workflow.begin_submission().unwrap();
    assert!(workflow.state().is_analyzing());
    assert!(!workflow.submit_enabled());

    assert_eq!(run(&mut workflow, &submitter), Err(SubmitRejected::InFlight));
    assert_eq!(calls.get(), 0);
    assert!(workflow.state().is_analyzing());

    assert!(workflow.finish_submission(&first.ticket, Ok(sample_result())));
    assert!(workflow.state().result().is_some());
}

#[test]
fn submission_snapshot_matches_staged_images() {
    let mut workflow = staged_workflow();
    let submission = workflow.begin_submission().unwrap();
    assert_eq!(submission.request.reference.name, "reference.jpg");
    assert_eq!(submission.request.current.name, "current.jpg");
}

// =============================================================
// Invalidation
// =============================================================

#[test]
fn slot_change_after_ready_returns_to_idle() {
    let mut workflow = staged_workflow();
    let submission = workflow.begin_submission().unwrap();
    workflow.finish_submission(&submission.ticket, Ok(sample_result()));

    assert!(workflow.set_slot(SlotId::Current, jpeg("newer.jpg")));
    assert_eq!(workflow.state(), &AnalysisState::Idle);
    assert!(workflow.can_submit());
}

#[test]
fn slot_change_after_failure_clears_error() {
    let mut workflow = staged_workflow();
    let submission = workflow.begin_submission().unwrap();
    workflow.finish_submission(&submission.ticket, Err(ErrorInfo::server("boom")));

    workflow.set_slot_from_selection(SlotId::Reference, vec![jpeg("other.jpg")]);
    assert_eq!(workflow.state(), &AnalysisState::Idle);
}

#[test]
fn rejected_file_leaves_result_in_place() {
    let mut workflow = staged_workflow();
    let submission = workflow.begin_submission().unwrap();
    workflow.finish_submission(&submission.ticket, Ok(sample_result()));

    let gif = SelectedFile::from_bytes("a.gif", "image/gif", b"GIF89a");
    assert!(!workflow.set_slot(SlotId::Current, gif));
    assert!(workflow.state().result().is_some());
}

#[test]
fn outcome_of_abandoned_submission_is_dropped() {
    let mut workflow = staged_workflow();
    let abandoned = workflow.begin_submission().unwrap();

    workflow.set_slot(SlotId::Current, jpeg("replacement.jpg"));
    assert_eq!(workflow.state(), &AnalysisState::Idle);

    assert!(!workflow.finish_submission(&abandoned.ticket, Ok(sample_result())));
    assert_eq!(workflow.state(), &AnalysisState::Idle);
}

#[test]
fn stale_ticket_cannot_overwrite_newer_submission() {
    let mut workflow = staged_workflow();
    let stale = workflow.begin_submission().unwrap();
    workflow.reset();
    workflow.set_slot(SlotId::Reference, jpeg("r2.jpg"));
    workflow.set_slot(SlotId::Current, jpeg("c2.jpg"));
    let fresh = workflow.begin_submission().unwrap();

    assert!(!workflow.finish_submission(&stale.ticket, Err(ErrorInfo::connectivity())));
    assert!(workflow.state().is_analyzing());
    assert!(workflow.finish_submission(&fresh.ticket, Ok(sample_result())));
}

#[test]
fn reset_clears_slots_result_and_previews() {
    let previews = CountingPreviews::default();
    let mut workflow = AnalysisWorkflow::new(previews.clone());
    workflow.set_slot(SlotId::Reference, jpeg("reference.jpg"));
    workflow.set_slot(SlotId::Current, jpeg("current.jpg"));
    let submission = workflow.begin_submission().unwrap();
    workflow.finish_submission(&submission.ticket, Ok(sample_result()));
    assert_eq!(previews.live.get(), 2);

    workflow.reset();

    assert_eq!(workflow.state(), &AnalysisState::Idle);
    assert!(!workflow.can_submit());
    assert_eq!(previews.live.get(), 0);
}

#[test]
fn tickets_carry_distinct_ids() {
    let mut workflow = staged_workflow();
    let first = workflow.begin_submission().unwrap();
    workflow.finish_submission(&first.ticket, Err(ErrorInfo::connectivity()));
    let second = workflow.begin_submission().unwrap();
    assert_ne!(first.ticket.id, second.ticket.id);
}
