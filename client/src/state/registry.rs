//! State for the read-only dashboard, plot registry, and report screens.
//!
//! DESIGN
//! ======
//! Each screen holds a `ListState` filled once by its fetcher. When the
//! offline-fallback flag is on, failed fetches are replaced by the fixed demo
//! datasets defined here and tagged `DataSource::Fallback` so the view can
//! label them. Search, filtering, and counters are computed on read.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use crate::net::api::{DataSource, Listing};
use crate::net::types::{AnalysisRecord, DashboardStats, PlotRecord, Severity};

// =============================================================================
// LIST STATE
// =============================================================================

/// Data for one list screen plus its load status.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub data: T,
    pub source: DataSource,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for ListState<T> {
    fn default() -> Self {
        Self { data: T::default(), source: DataSource::Live, loading: true, error: None }
    }
}

impl<T> ListState<T> {
    /// Store the outcome of a fetch.
    pub fn apply(&mut self, outcome: Result<Listing<T>, String>) {
        self.loading = false;
        match outcome {
            Ok(listing) => {
                self.data = listing.data;
                self.source = listing.source;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

pub type DashboardState = ListState<(DashboardStats, Vec<PlotRecord>)>;
pub type ReportsState = ListState<Vec<AnalysisRecord>>;

// =============================================================================
// PLOT REGISTRY
// =============================================================================

/// Compliance filter of the plot registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlotFilter {
    #[default]
    All,
    Compliant,
    Violations,
}

impl PlotFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Compliant, Self::Violations];

    /// `<option>` value.
    pub fn value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Compliant => "compliant",
            Self::Violations => "violations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Plots",
            Self::Compliant => "Compliant Only",
            Self::Violations => "Violations Only",
        }
    }

    pub fn from_value(raw: &str) -> Self {
        match raw {
            "compliant" => Self::Compliant,
            "violations" => Self::Violations,
            _ => Self::All,
        }
    }

    pub fn matches(self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Compliant => status == COMPLIANT_STATUS,
            Self::Violations => status != COMPLIANT_STATUS,
        }
    }
}

pub const COMPLIANT_STATUS: &str = "Compliant";

/// Case-insensitive match of `query` against id, name, and lessee.
pub fn plot_matches_search(plot: &PlotRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [Some(plot.id.as_str()), Some(plot.name.as_str()), plot.lessee.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Plot registry screen: fetched plots plus the search box and filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotsState {
    pub list: ListState<Vec<PlotRecord>>,
    pub search: String,
    pub filter: PlotFilter,
}

impl PlotsState {
    /// Plots passing both the search text and the filter, in registry order.
    pub fn visible(&self) -> Vec<&PlotRecord> {
        self.list
            .data
            .iter()
            .filter(|p| plot_matches_search(p, &self.search) && self.filter.matches(&p.status))
            .collect()
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// One non-empty bucket of the status distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBucket {
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
}

const DISTRIBUTION_COLORS: [&str; 5] = ["#10b981", "#ef4444", "#f59e0b", "#8b5cf6", "#06b6d4"];

/// Status buckets with a non-zero count, in fixed order.
pub fn status_distribution(stats: &DashboardStats) -> Vec<StatusBucket> {
    [
        ("Compliant", stats.compliant),
        ("Encroachment", stats.encroachments),
        ("Vacant", stats.vacant_plots),
        ("Boundary Issues", stats.boundary_deviations),
        ("Unauthorized", stats.unauthorized_construction),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0)
    .enumerate()
    .map(|(i, (name, value))| StatusBucket { name, value, color: DISTRIBUTION_COLORS[i % DISTRIBUTION_COLORS.len()] })
    .collect()
}

/// Share of `bucket` among all buckets, as a whole percentage for bar widths.
pub fn bucket_share(bucket: &StatusBucket, buckets: &[StatusBucket]) -> u64 {
    let total: u64 = buckets.iter().map(|b| b.value).sum();
    if total == 0 { 0 } else { bucket.value * 100 / total }
}

// =============================================================================
// REPORTS
// =============================================================================

/// Counters shown above the analysis history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportCounts {
    pub total: usize,
    /// Critical or High.
    pub high_risk: usize,
    pub low_risk: usize,
}

pub fn report_counts(analyses: &[AnalysisRecord]) -> ReportCounts {
    let count = |pred: fn(&Severity) -> bool| analyses.iter().filter(|a| a.risk_level().is_some_and(pred)).count();
    ReportCounts {
        total: analyses.len(),
        high_risk: count(Severity::is_elevated),
        low_risk: count(|s| matches!(s, Severity::Low)),
    }
}

// =============================================================================
// OFFLINE DEMO DATA
// =============================================================================

pub fn fallback_dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_plots: 6,
        compliant: 2,
        violations_detected: 4,
        encroachments: 1,
        vacant_plots: 1,
        boundary_deviations: 1,
        unauthorized_construction: 1,
        pending_dues: 1,
        total_analyses: 0,
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_plot(
    id: &str,
    name: &str,
    status: &str,
    area_sqm: u64,
    lessee: &str,
    allotment_date: &str,
    last_inspection: &str,
    lease_status: &str,
    coordinates: [f64; 2],
) -> PlotRecord {
    PlotRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        status: status.to_owned(),
        area_sqm: Some(area_sqm),
        lessee: Some(lessee.to_owned()),
        coordinates: Some(coordinates),
        allotment_date: Some(allotment_date.to_owned()),
        last_inspection: Some(last_inspection.to_owned()),
        lease_status: Some(lease_status.to_owned()),
    }
}

pub fn fallback_plots() -> Vec<PlotRecord> {
    vec![
        demo_plot(
            "PLOT-001",
            "Siltara Industrial Area - Plot A1",
            "Compliant",
            4500,
            "ABC Industries Pvt Ltd",
            "2019-03-15",
            "2025-11-20",
            "Active",
            [21.2854, 81.5880],
        ),
        demo_plot(
            "PLOT-002",
            "Siltara Industrial Area - Plot A2",
            "Encroachment Detected",
            3200,
            "XYZ Manufacturing",
            "2020-06-01",
            "2025-10-15",
            "Active",
            [21.2860, 81.5890],
        ),
        demo_plot(
            "PLOT-003",
            "Urla Industrial Area - Plot B5",
            "Vacant/Unused",
            6000,
            "PQR Steels",
            "2018-01-10",
            "2025-09-05",
            "Dues Pending",
            [21.2230, 81.5640],
        ),
        demo_plot(
            "PLOT-004",
            "Urla Industrial Area - Plot B6",
            "Boundary Deviation",
            5100,
            "LMN Chemicals",
            "2017-08-22",
            "2025-12-01",
            "Active",
            [21.2240, 81.5650],
        ),
        demo_plot(
            "PLOT-005",
            "Borai Industrial Area - Plot C1",
            "Unauthorized Construction",
            7500,
            "DEF Pharma Ltd",
            "2021-02-14",
            "2025-08-18",
            "Active",
            [21.3010, 81.6200],
        ),
        demo_plot(
            "PLOT-006",
            "Borai Industrial Area - Plot C2",
            "Compliant",
            4000,
            "GHI Textiles",
            "2019-11-30",
            "2025-07-25",
            "Active",
            [21.3020, 81.6210],
        ),
    ]
}

/// There is no demo history: offline, the reports screen shows its empty state.
pub fn fallback_analyses() -> Vec<AnalysisRecord> {
    Vec::new()
}
