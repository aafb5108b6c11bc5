//! Analysis workflow state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AnalysisWorkflow` is the single owner of the staging area and the
//! `AnalysisState`. Views only read it. A submission is split in two halves so
//! the network exchange can run outside any borrow of the workflow:
//!
//! 1. `begin_submission` checks preconditions, moves to `Analyzing`, and hands
//!    out an immutable `AnalysisRequest` plus a `SubmissionTicket`.
//! 2. `finish_submission` applies the outcome only if the ticket still matches
//!    the current generation. Any slot change or reset bumps the generation,
//!    so the result of an abandoned request is dropped instead of overwriting
//!    newer state.
//!
//! There is no cancellation: an abandoned request still runs to completion in
//! the browser, its outcome is simply ignored.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use crate::net::types::AnalysisResult;
use crate::state::upload::{AnalysisRequest, PreviewProvider, SelectedFile, SlotId, UploadStagingArea};

/// Guidance shown when no response was received from the service.
pub const CONNECTIVITY_MESSAGE: &str =
    "Failed to connect to the analysis service. Make sure the backend is running and reachable.";

/// Fallback when a failure response carries no usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed";

/// Shown when a success response does not decode into a result.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Analysis failed: the service returned an unexpected response";

/// Classification of a failed submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received.
    Connectivity,
    /// A response was received but could not be used.
    Server,
}

/// User-facing failure of one submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn connectivity() -> Self {
        Self { kind: ErrorKind::Connectivity, message: CONNECTIVITY_MESSAGE.to_owned() }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Server, message: message.into() }
    }

    pub fn malformed_response() -> Self {
        Self::server(MALFORMED_RESPONSE_MESSAGE)
    }
}

/// Lifecycle of the current analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Ready(AnalysisResult),
    Failed(ErrorInfo),
}

impl AnalysisState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Why `begin_submission` refused to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("both a reference and a current image are required")]
    MissingImages,
    #[error("an analysis is already in progress")]
    InFlight,
}

/// Identifies one started submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
    /// Correlation id for logs.
    pub id: uuid::Uuid,
}

/// A started submission: the request to send and the ticket to finish it with.
#[derive(Clone, Debug)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub request: AnalysisRequest,
}

/// Staging area plus analysis state for one workflow instance.
#[derive(Debug)]
pub struct AnalysisWorkflow<P: PreviewProvider> {
    staging: UploadStagingArea<P>,
    state: AnalysisState,
    generation: u64,
}

impl<P: PreviewProvider> AnalysisWorkflow<P> {
    pub fn new(previews: P) -> Self {
        Self { staging: UploadStagingArea::new(previews), state: AnalysisState::Idle, generation: 0 }
    }

    pub fn staging(&self) -> &UploadStagingArea<P> {
        &self.staging
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Both slots filled.
    pub fn can_submit(&self) -> bool {
        self.staging.can_submit()
    }

    /// Whether the submit affordance should be enabled.
    pub fn submit_enabled(&self) -> bool {
        self.can_submit() && !self.state.is_analyzing()
    }

    /// Stage a file. An accepted change invalidates any prior result or error
    /// and abandons an in-flight submission.
    pub fn set_slot(&mut self, slot: SlotId, file: SelectedFile) -> bool {
        let accepted = self.staging.set_slot(slot, file);
        if accepted {
            self.invalidate("slot changed");
        }
        accepted
    }

    /// Stage a picker/drop selection (exactly one file).
    pub fn set_slot_from_selection(&mut self, slot: SlotId, files: Vec<SelectedFile>) -> bool {
        let accepted = self.staging.set_slot_from_selection(slot, files);
        if accepted {
            self.invalidate("slot changed");
        }
        accepted
    }

    /// Clear both slots and return to `Idle`.
    pub fn reset(&mut self) {
        self.staging.reset();
        self.invalidate("reset");
    }

    /// Start a submission.
    ///
    /// # Errors
    ///
    /// `InFlight` while a submission is outstanding, `MissingImages` unless
    /// both slots are filled. Neither changes state.
    pub fn begin_submission(&mut self) -> Result<Submission, SubmitRejected> {
        if self.state.is_analyzing() {
            log::info!("analysis: submission rejected, already in flight");
            return Err(SubmitRejected::InFlight);
        }
        let Some(request) = self.staging.request() else {
            return Err(SubmitRejected::MissingImages);
        };
        self.generation += 1;
        let ticket = SubmissionTicket { generation: self.generation, id: uuid::Uuid::new_v4() };
        log::debug!("analysis: {} -> analyzing (submission {})", self.state.name(), ticket.id);
        self.state = AnalysisState::Analyzing;
        Ok(Submission { ticket, request })
    }

    /// Apply the outcome of a submission.
    ///
    /// Returns `false` and leaves state untouched when the ticket was
    /// superseded by a slot change, reset, or newer submission.
    pub fn finish_submission(&mut self, ticket: &SubmissionTicket, outcome: Result<AnalysisResult, ErrorInfo>) -> bool {
        if ticket.generation != self.generation || !self.state.is_analyzing() {
            log::info!("analysis: dropping outcome of abandoned submission {}", ticket.id);
            return false;
        }
        self.state = match outcome {
            Ok(result) => AnalysisState::Ready(result),
            Err(error) => AnalysisState::Failed(error),
        };
        log::debug!("analysis: analyzing -> {} (submission {})", self.state.name(), ticket.id);
        true
    }

    fn invalidate(&mut self, reason: &str) {
        self.generation += 1;
        if !matches!(self.state, AnalysisState::Idle) {
            log::debug!("analysis: {} -> idle ({reason})", self.state.name());
        }
        self.state = AnalysisState::Idle;
    }
}
