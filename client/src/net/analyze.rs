//! Submission of an image pair to `POST /api/analyze`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AnalysisSubmitter` turns an `AnalysisRequest` into one multipart exchange
//! and classifies the outcome. The HTTP exchange itself sits behind
//! `AnalysisTransport` so the browser implementation (`gloo-net` + `FormData`)
//! can be swapped for a scripted one in tests.
//!
//! ERROR HANDLING
//! ==============
//! - No response at all (DNS, refused connection, CORS, offline) is a
//!   connectivity failure with a fixed guidance message.
//! - A non-2xx response uses the body's `detail` when present, else the
//!   generic failure text.
//! - A 2xx response that does not decode is a server failure; the workflow
//!   never sees a partially valid result.

#[cfg(test)]
#[path = "analyze_test.rs"]
mod analyze_test;

use std::future::Future;

use super::api::{ANALYZE_PATH, ApiConfig};
use super::types::{AnalysisResult, ErrorBody, decode_analysis_response};
use crate::state::analysis::{ErrorInfo, GENERIC_FAILURE_MESSAGE};
use crate::state::upload::AnalysisRequest;

/// Status and body of a received HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response was received.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("analysis request failed before a response was received: {0}")]
pub struct TransportError(pub String);

/// One multipart POST carrying `reference` and `current`.
pub trait AnalysisTransport {
    fn post_analysis(
        &self,
        url: &str,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

/// Sends analysis requests to the configured service.
#[derive(Clone, Debug)]
pub struct AnalysisSubmitter<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: AnalysisTransport> AnalysisSubmitter<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Perform exactly one exchange for `request`.
    ///
    /// # Errors
    ///
    /// Returns an `ErrorInfo` classified as described in the module docs.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ErrorInfo> {
        let url = self.config.endpoint(ANALYZE_PATH);
        log::info!(
            "analyze: POST {url} reference={} ({} bytes) current={} ({} bytes)",
            request.reference.name,
            request.reference.size_bytes,
            request.current.name,
            request.current.size_bytes
        );
        match self.transport.post_analysis(&url, request).await {
            Ok(raw) => classify_response(&raw),
            Err(e) => {
                log::warn!("analyze: {e}");
                Err(ErrorInfo::connectivity())
            }
        }
    }
}

/// Map a received response to a result or a server-side `ErrorInfo`.
///
/// # Errors
///
/// Non-2xx statuses and undecodable success bodies.
pub fn classify_response(raw: &RawResponse) -> Result<AnalysisResult, ErrorInfo> {
    if raw.is_success() {
        return decode_analysis_response(&raw.body).map_err(|e| {
            log::error!("analyze: status {} but body rejected: {e}", raw.status);
            ErrorInfo::malformed_response()
        });
    }
    let message = serde_json::from_str::<ErrorBody>(&raw.body)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
    log::warn!("analyze: status {}: {message}", raw.status);
    Err(ErrorInfo::server(message))
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `fetch`-backed transport used in the hydrated app.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
impl AnalysisTransport for BrowserTransport {
    async fn post_analysis(&self, url: &str, request: &AnalysisRequest) -> Result<RawResponse, TransportError> {
        use crate::state::upload::SlotId;

        let form = web_sys::FormData::new().map_err(js_error)?;
        append_image(&form, SlotId::Reference.field_name(), &request.reference)?;
        append_image(&form, SlotId::Current.field_name(), &request.current)?;

        let response = gloo_net::http::Request::post(url)
            .body(form)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
fn append_image(
    form: &web_sys::FormData,
    field: &str,
    image: &crate::state::upload::StagedImage,
) -> Result<(), TransportError> {
    use crate::state::upload::ImagePayload;

    match &image.payload {
        ImagePayload::File(file) => form.append_with_blob_and_filename(field, file, &image.name),
        ImagePayload::Bytes(bytes) => {
            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(&bytes[..]));
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(image.media_type.mime());
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
            form.append_with_blob_and_filename(field, &blob, &image.name)
        }
    }
    .map_err(js_error)
}

#[cfg(feature = "hydrate")]
fn js_error(value: wasm_bindgen::JsValue) -> TransportError {
    TransportError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
