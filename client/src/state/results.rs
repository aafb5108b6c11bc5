//! View models for a `Ready` analysis: summary banner, image tabs, and the
//! deviation table.
//!
//! DESIGN
//! ======
//! Everything here is derived from an `AnalysisResult` without I/O. Tab
//! selection is plain local state; switching tabs only changes which of the
//! already-decoded images is shown.

#[cfg(test)]
#[path = "results_test.rs"]
mod results_test;

use std::collections::HashSet;

use crate::net::types::{AnalysisResult, AnalysisSummary, Deviation, ImageKey};
use crate::util::badge::{risk_color, risk_meter_class, severity_badge_class};
use crate::util::format::{format_bbox, format_percentage, format_unchanged_percentage, group_digits};

// =============================================================================
// TABS
// =============================================================================

/// Image view selector. Defaults to the change overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    Overlay,
    Heatmap,
    Difference,
    Annotated,
}

/// One rendered image with its caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultPanel {
    pub key: ImageKey,
    pub alt: &'static str,
    pub caption: &'static str,
}

const OVERLAY_PANELS: [ResultPanel; 1] = [ResultPanel {
    key: ImageKey::Overlay,
    alt: "Overlay",
    caption: "Red regions show detected changes between reference and current image",
}];

const HEATMAP_PANELS: [ResultPanel; 1] = [ResultPanel {
    key: ImageKey::Heatmap,
    alt: "Heatmap",
    caption: "Heat intensity shows magnitude of change (blue=low, red=high)",
}];

const DIFFERENCE_PANELS: [ResultPanel; 1] = [ResultPanel {
    key: ImageKey::Difference,
    alt: "Difference",
    caption: "Binary mask of significant changes after noise filtering",
}];

const ANNOTATED_PANELS: [ResultPanel; 2] = [
    ResultPanel {
        key: ImageKey::AnnotatedReference,
        alt: "Annotated Reference",
        caption: "Reference Map (with deviation regions)",
    },
    ResultPanel {
        key: ImageKey::AnnotatedCurrent,
        alt: "Annotated Current",
        caption: "Current Image (with deviation regions)",
    },
];

impl ResultTab {
    pub const ALL: [Self; 4] = [Self::Overlay, Self::Heatmap, Self::Difference, Self::Annotated];

    pub fn id(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Heatmap => "heatmap",
            Self::Difference => "difference",
            Self::Annotated => "annotated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overlay => "Change Overlay",
            Self::Heatmap => "Heatmap",
            Self::Difference => "Binary Diff",
            Self::Annotated => "Annotated",
        }
    }

    /// Images shown by this tab, left to right.
    pub fn panels(self) -> &'static [ResultPanel] {
        match self {
            Self::Overlay => &OVERLAY_PANELS,
            Self::Heatmap => &HEATMAP_PANELS,
            Self::Difference => &DIFFERENCE_PANELS,
            Self::Annotated => &ANNOTATED_PANELS,
        }
    }

    /// Side-by-side layout for multi-image tabs.
    pub fn is_split(self) -> bool {
        self.panels().len() > 1
    }
}

/// `data:` URL for a base64 JPEG payload from the service.
pub fn jpeg_data_url(payload: &str) -> String {
    format!("data:image/jpeg;base64,{payload}")
}

/// Data URLs for the images of `tab`, paired with their panel metadata.
pub fn tab_images(result: &AnalysisResult, tab: ResultTab) -> Vec<(ResultPanel, String)> {
    tab.panels().iter().map(|panel| (*panel, jpeg_data_url(result.images.get(panel.key)))).collect()
}

// =============================================================================
// SUMMARY
// =============================================================================

/// One stat tile under the risk banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryTile {
    pub value: String,
    pub label: &'static str,
    /// Icon tint class (`red`, `amber`, `blue`, `green`).
    pub tone: &'static str,
}

/// Risk banner plus stat tiles for a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSummaryView {
    pub headline: String,
    pub description: String,
    pub meter_class: &'static str,
    pub color: &'static str,
    pub tiles: Vec<SummaryTile>,
}

impl ResultSummaryView {
    pub fn from_summary(summary: &AnalysisSummary) -> Self {
        let risk = &summary.risk_level;
        let pct = format_percentage(summary.change_percentage);
        Self {
            headline: format!("Risk Level: {risk}"),
            description: format!("{} deviation(s) detected · {pct} area changed", summary.total_deviations),
            meter_class: risk_meter_class(risk),
            color: risk_color(risk),
            tiles: vec![
                SummaryTile { value: summary.total_deviations.to_string(), label: "Deviations Found", tone: "red" },
                SummaryTile { value: pct, label: "Area Changed", tone: "amber" },
                SummaryTile {
                    value: group_digits(summary.changed_area_pixels),
                    label: "Changed Pixels",
                    tone: "blue",
                },
                SummaryTile {
                    value: format_unchanged_percentage(summary.change_percentage),
                    label: "Unchanged Area",
                    tone: "green",
                },
            ],
        }
    }
}

// =============================================================================
// DEVIATIONS
// =============================================================================

/// One row of the deviation table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviationRow {
    pub id: String,
    pub kind: String,
    pub severity: String,
    pub badge_class: &'static str,
    pub area: String,
    pub location: String,
}

impl DeviationRow {
    pub fn from_deviation(deviation: &Deviation) -> Self {
        Self {
            id: deviation.id.clone(),
            kind: deviation.kind.clone(),
            severity: deviation.severity.label().to_owned(),
            badge_class: severity_badge_class(&deviation.severity),
            area: group_digits(deviation.area_pixels),
            location: format_bbox(&deviation.bbox),
        }
    }
}

/// Rows in the order the service returned them.
pub fn deviation_rows(result: &AnalysisResult) -> Vec<DeviationRow> {
    result.deviations.iter().map(DeviationRow::from_deviation).collect()
}

/// The table section is omitted entirely when there is nothing to list.
pub fn show_deviation_table(result: &AnalysisResult) -> bool {
    !result.deviations.is_empty()
}

/// Rows the user marked for manual review. Local only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewFlags {
    flagged: HashSet<String>,
}

impl ReviewFlags {
    /// Flip the flag on `id`; returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.flagged.remove(id) {
            false
        } else {
            self.flagged.insert(id.to_owned());
            true
        }
    }

    pub fn is_flagged(&self, id: &str) -> bool {
        self.flagged.contains(id)
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }
}

/// Header text for the deviation table, `None` while nothing is flagged.
pub fn flagged_summary(flags: &ReviewFlags) -> Option<String> {
    if flags.is_empty() {
        return None;
    }
    Some(format!("{} flagged for review", flags.len()))
}
