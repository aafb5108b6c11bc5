//! Wire DTOs for the analysis service and the strict result decode step.
//!
//! DESIGN
//! ======
//! The analysis response is decoded into private wire structs first and only
//! then converted into `AnalysisResult`. Any shape mismatch (missing image,
//! out-of-range percentage, undecodable base64) becomes a `DecodeError` so the
//! workflow never transitions to `Ready` with a partially usable payload.
//!
//! The list endpoints (`/api/plots`, `/api/analyses`, `/api/dashboard/stats`)
//! are read-only and decoded leniently with serde defaults.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// SEVERITY
// =============================================================================

/// Severity shared by the overall risk level and each deviation.
///
/// Values outside the four known levels are kept verbatim in `Other` so the
/// renderer can fall back to a neutral badge instead of rejecting the result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Parse a wire label. Matching is exact, as the service emits title case.
    pub fn from_label(raw: &str) -> Self {
        match raw {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Other(raw) => raw,
        }
    }

    /// True for the two levels counted as "high risk" in report history.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// =============================================================================
// ANALYSIS RESULT (domain)
// =============================================================================

/// Decoded, validated result of one change-detection run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    /// Short identifier assigned by the service, when provided.
    pub result_id: Option<String>,
    pub summary: AnalysisSummary,
    pub images: ResultImages,
    /// Deviations in the order the service returned them.
    pub deviations: Vec<Deviation>,
    pub metadata: Option<AnalysisMetadata>,
}

/// Aggregate metrics for one analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisSummary {
    pub risk_level: Severity,
    pub total_deviations: u64,
    /// Percentage of the image area classified as changed, in `[0, 100]`.
    pub change_percentage: f64,
    pub changed_area_pixels: u64,
    pub total_area_pixels: Option<u64>,
}

/// Base64-encoded JPEG payloads, one per rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultImages {
    pub overlay: String,
    pub heatmap: String,
    pub difference: String,
    pub annotated_reference: String,
    pub annotated_current: String,
}

/// Fixed key set of `ResultImages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKey {
    Overlay,
    Heatmap,
    Difference,
    AnnotatedReference,
    AnnotatedCurrent,
}

impl ImageKey {
    pub const ALL: [Self; 5] = [
        Self::Overlay,
        Self::Heatmap,
        Self::Difference,
        Self::AnnotatedReference,
        Self::AnnotatedCurrent,
    ];

    /// Field name used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Heatmap => "heatmap",
            Self::Difference => "difference",
            Self::AnnotatedReference => "annotated_reference",
            Self::AnnotatedCurrent => "annotated_current",
        }
    }
}

impl ResultImages {
    pub fn get(&self, key: ImageKey) -> &str {
        match key {
            ImageKey::Overlay => &self.overlay,
            ImageKey::Heatmap => &self.heatmap,
            ImageKey::Difference => &self.difference,
            ImageKey::AnnotatedReference => &self.annotated_reference,
            ImageKey::AnnotatedCurrent => &self.annotated_current,
        }
    }
}

/// One detected discrepancy region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deviation {
    pub id: String,
    /// Free-text classification label (e.g. `"Boundary Deviation"`).
    pub kind: String,
    pub severity: Severity,
    pub area_pixels: u64,
    pub bbox: BoundingBox,
}

/// Axis-aligned box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub x: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub y: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub width: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub height: u64,
}

/// Request metadata echoed back by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(default)]
    pub reference_filename: Option<String>,
    #[serde(default)]
    pub current_filename: Option<String>,
    #[serde(default)]
    pub analyzed_at: Option<String>,
    #[serde(default)]
    pub reference_dimensions: Option<String>,
    #[serde(default)]
    pub current_dimensions: Option<String>,
}

// =============================================================================
// DECODE
// =============================================================================

/// Reasons a success-status body could not become an `AnalysisResult`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    #[error("response body is not valid analysis JSON: {0}")]
    Shape(String),
    #[error("change_percentage {0} is outside [0, 100]")]
    PercentageOutOfRange(f64),
    #[error("image `{0}` is empty")]
    EmptyImage(&'static str),
    #[error("image `{0}` is not valid base64")]
    InvalidImage(&'static str),
    #[error("deviation at index {0} has an empty id")]
    EmptyDeviationId(usize),
}

#[derive(Deserialize)]
struct AnalysisResponseWire {
    #[serde(default)]
    result_id: Option<String>,
    summary: SummaryWire,
    images: ImagesWire,
    deviations: Vec<DeviationWire>,
    #[serde(default)]
    metadata: Option<AnalysisMetadata>,
}

#[derive(Deserialize)]
struct SummaryWire {
    risk_level: Severity,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    total_deviations: u64,
    change_percentage: f64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    changed_area_pixels: u64,
    #[serde(default, deserialize_with = "deserialize_opt_u64_from_number")]
    total_area_pixels: Option<u64>,
}

#[derive(Deserialize)]
struct ImagesWire {
    overlay: String,
    heatmap: String,
    difference: String,
    annotated_reference: String,
    annotated_current: String,
}

#[derive(Deserialize)]
struct DeviationWire {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    severity: Severity,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    area_pixels: u64,
    bbox: BoundingBox,
}

/// Decode and validate a success response body from `POST /api/analyze`.
///
/// # Errors
///
/// Returns a `DecodeError` when the JSON shape does not match or a field
/// violates its documented range.
pub fn decode_analysis_response(body: &str) -> Result<AnalysisResult, DecodeError> {
    let wire: AnalysisResponseWire = serde_json::from_str(body).map_err(|e| DecodeError::Shape(e.to_string()))?;

    let pct = wire.summary.change_percentage;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(DecodeError::PercentageOutOfRange(pct));
    }

    let images = ResultImages {
        overlay: wire.images.overlay,
        heatmap: wire.images.heatmap,
        difference: wire.images.difference,
        annotated_reference: wire.images.annotated_reference,
        annotated_current: wire.images.annotated_current,
    };
    for key in ImageKey::ALL {
        validate_image_payload(key.wire_name(), images.get(key))?;
    }

    let mut deviations = Vec::with_capacity(wire.deviations.len());
    for (index, d) in wire.deviations.into_iter().enumerate() {
        if d.id.trim().is_empty() {
            return Err(DecodeError::EmptyDeviationId(index));
        }
        deviations.push(Deviation {
            id: d.id,
            kind: d.kind,
            severity: d.severity,
            area_pixels: d.area_pixels,
            bbox: d.bbox,
        });
    }

    Ok(AnalysisResult {
        result_id: wire.result_id,
        summary: AnalysisSummary {
            risk_level: wire.summary.risk_level,
            total_deviations: wire.summary.total_deviations,
            change_percentage: pct,
            changed_area_pixels: wire.summary.changed_area_pixels,
            total_area_pixels: wire.summary.total_area_pixels,
        },
        images,
        deviations,
        metadata: wire.metadata,
    })
}

fn validate_image_payload(name: &'static str, payload: &str) -> Result<(), DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::EmptyImage(name));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map(|_| ())
        .map_err(|_| DecodeError::InvalidImage(name))
}

/// Error body returned by the service on non-success statuses.
///
/// `detail` is usually a string; request validation failures carry a list of
/// `{ "msg": ... }` objects instead.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable message extracted from `detail`, if any.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                if parts.is_empty() { None } else { Some(parts.join("; ")) }
            }
            _ => None,
        }
    }
}

// =============================================================================
// LIST ENDPOINTS
// =============================================================================

/// Aggregate counters from `GET /api/dashboard/stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_plots: u64,
    pub compliant: u64,
    pub violations_detected: u64,
    pub encroachments: u64,
    pub vacant_plots: u64,
    pub boundary_deviations: u64,
    pub unauthorized_construction: u64,
    pub pending_dues: u64,
    pub total_analyses: u64,
}

/// One registered plot from `GET /api/plots`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_opt_u64_from_number")]
    pub area_sqm: Option<u64>,
    #[serde(default)]
    pub lessee: Option<String>,
    /// `[lat, lng]`.
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    #[serde(default)]
    pub allotment_date: Option<String>,
    #[serde(default)]
    pub last_inspection: Option<String>,
    #[serde(default)]
    pub lease_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlotsEnvelope {
    #[serde(default)]
    pub plots: Vec<PlotRecord>,
}

/// Summary fields of a stored analysis, all optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecordSummary {
    pub risk_level: Option<Severity>,
    pub total_deviations: Option<u64>,
    pub change_percentage: Option<f64>,
}

/// One historical analysis from `GET /api/analyses`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub result_id: String,
    #[serde(default)]
    pub reference_file: Option<String>,
    #[serde(default)]
    pub current_file: Option<String>,
    #[serde(default)]
    pub summary: Option<AnalysisRecordSummary>,
    #[serde(default)]
    pub analyzed_at: Option<String>,
}

impl AnalysisRecord {
    pub fn risk_level(&self) -> Option<&Severity> {
        self.summary.as_ref().and_then(|s| s.risk_level.as_ref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysesEnvelope {
    #[serde(default)]
    pub analyses: Vec<AnalysisRecord>,
}

// =============================================================================
// NUMBER HELPERS
// =============================================================================

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn u64_from_value<E: serde::de::Error>(value: &serde_json::Value) -> Result<u64, E> {
    if let Some(v) = value.as_u64() {
        return Ok(v);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
            return Ok(f as u64);
        }
    }
    Err(E::custom(format!("expected non-negative integer, got {value}")))
}

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    u64_from_value(&value)
}

fn deserialize_opt_u64_from_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => u64_from_value(&v).map(Some),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
