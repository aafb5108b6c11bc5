//! Liveness and readiness endpoints.
//!
//! DESIGN
//! ======
//! `/healthz` answers as soon as the process serves HTTP. `/readyz` probes
//! `GET {analysis_url}/` with the shared client; the probe outcome is mapped
//! to a status code by a pure function so the mapping is tested without I/O.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Result of one probe against the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The service answered with this HTTP status.
    Answered(u16),
    /// No response within the timeout, or the connection failed.
    Unreachable(String),
}

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub status: &'static str,
    pub upstream: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let upstream = state.config.analysis_url.clone();
    let outcome = probe(&state.http, &upstream).await;
    let status = readiness_status(&outcome);

    if status == StatusCode::OK {
        tracing::debug!(%upstream, "analysis service ready");
    } else {
        tracing::warn!(%upstream, ?outcome, "analysis service not ready");
    }

    let detail = match outcome {
        ProbeOutcome::Answered(code) if status != StatusCode::OK => Some(format!("upstream answered {code}")),
        ProbeOutcome::Answered(_) => None,
        ProbeOutcome::Unreachable(reason) => Some(reason),
    };
    let label = if status == StatusCode::OK { "ready" } else { "unavailable" };

    (status, Json(ReadinessReport { status: label, upstream, detail }))
}

/// Issue a single `GET {base}/` and record what happened.
pub async fn probe(http: &reqwest::Client, base: &str) -> ProbeOutcome {
    match http.get(format!("{base}/")).send().await {
        Ok(response) => ProbeOutcome::Answered(response.status().as_u16()),
        Err(e) => ProbeOutcome::Unreachable(e.to_string()),
    }
}

/// 200 when the service answered with a success status, 503 otherwise.
#[must_use]
pub fn readiness_status(outcome: &ProbeOutcome) -> StatusCode {
    match outcome {
        ProbeOutcome::Answered(code) if (200..300).contains(code) => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}
