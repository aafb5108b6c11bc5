use super::*;
use crate::net::types::AnalysisRecordSummary;

// =============================================================
// Helpers
// =============================================================

fn record(id: &str, risk: Option<&str>) -> AnalysisRecord {
    AnalysisRecord {
        result_id: id.to_owned(),
        reference_file: None,
        current_file: None,
        summary: risk.map(|r| AnalysisRecordSummary {
            risk_level: Some(Severity::from_label(r)),
            total_deviations: Some(1),
            change_percentage: Some(2.5),
        }),
        analyzed_at: None,
    }
}

fn plots_state(search: &str, filter: PlotFilter) -> PlotsState {
    let mut state = PlotsState { search: search.to_owned(), filter, ..PlotsState::default() };
    state.list.apply(Ok(Listing { data: fallback_plots(), source: DataSource::Fallback }));
    state
}

fn visible_ids(state: &PlotsState) -> Vec<&str> {
    state.visible().into_iter().map(|p| p.id.as_str()).collect()
}

// =============================================================
// ListState
// =============================================================

#[test]
fn list_state_starts_loading() {
    let state = ReportsState::default();
    assert!(state.loading);
    assert!(state.data.is_empty());
    assert!(state.error.is_none());
}

#[test]
fn apply_success_records_source() {
    let mut state = ReportsState::default();
    state.apply(Ok(Listing { data: vec![record("a1", Some("Low"))], source: DataSource::Live }));
    assert!(!state.loading);
    assert!(!state.is_fallback());
    assert_eq!(state.data.len(), 1);
}

#[test]
fn apply_error_keeps_previous_data() {
    let mut state = ReportsState::default();
    state.apply(Ok(Listing { data: vec![record("a1", None)], source: DataSource::Live }));
    state.apply(Err("GET /api/analyses failed: 500".to_owned()));
    assert_eq!(state.error.as_deref(), Some("GET /api/analyses failed: 500"));
    assert_eq!(state.data.len(), 1);
    assert!(!state.loading);
}

// =============================================================
// Plot search and filter
// =============================================================

#[test]
fn empty_search_and_all_filter_show_everything() {
    let state = plots_state("", PlotFilter::All);
    assert_eq!(state.visible().len(), 6);
}

#[test]
fn search_matches_id_name_and_lessee_case_insensitively() {
    assert_eq!(visible_ids(&plots_state("plot-004", PlotFilter::All)), vec!["PLOT-004"]);
    assert_eq!(visible_ids(&plots_state("borai", PlotFilter::All)), vec!["PLOT-005", "PLOT-006"]);
    assert_eq!(visible_ids(&plots_state("PQR", PlotFilter::All)), vec!["PLOT-003"]);
    assert!(visible_ids(&plots_state("nowhere", PlotFilter::All)).is_empty());
}

#[test]
fn filter_splits_compliant_from_violations() {
    assert_eq!(visible_ids(&plots_state("", PlotFilter::Compliant)), vec!["PLOT-001", "PLOT-006"]);
    assert_eq!(
        visible_ids(&plots_state("", PlotFilter::Violations)),
        vec!["PLOT-002", "PLOT-003", "PLOT-004", "PLOT-005"]
    );
}

#[test]
fn search_and_filter_combine() {
    assert_eq!(visible_ids(&plots_state("siltara", PlotFilter::Violations)), vec!["PLOT-002"]);
}

#[test]
fn plot_without_lessee_still_matches_on_name() {
    let mut plot = fallback_plots().remove(0);
    plot.lessee = None;
    assert!(plot_matches_search(&plot, "siltara"));
    assert!(!plot_matches_search(&plot, "abc industries"));
}

#[test]
fn filter_round_trips_option_values() {
    for filter in PlotFilter::ALL {
        assert_eq!(PlotFilter::from_value(filter.value()), filter);
    }
    assert_eq!(PlotFilter::from_value("bogus"), PlotFilter::All);
}

// =============================================================
// Dashboard distribution
// =============================================================

#[test]
fn distribution_from_fallback_stats() {
    let buckets = status_distribution(&fallback_dashboard_stats());
    let pairs: Vec<_> = buckets.iter().map(|b| (b.name, b.value)).collect();
    assert_eq!(
        pairs,
        vec![("Compliant", 2), ("Encroachment", 1), ("Vacant", 1), ("Boundary Issues", 1), ("Unauthorized", 1)]
    );
    assert_eq!(bucket_share(&buckets[0], &buckets), 33);
}

#[test]
fn distribution_skips_empty_buckets_and_recolors() {
    let stats = DashboardStats { compliant: 0, encroachments: 3, unauthorized_construction: 1, ..DashboardStats::default() };
    let buckets = status_distribution(&stats);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].name, "Encroachment");
    assert_eq!(buckets[0].color, "#10b981");
    assert_eq!(buckets[1].name, "Unauthorized");
}

#[test]
fn bucket_share_of_empty_distribution_is_zero() {
    let bucket = StatusBucket { name: "Compliant", value: 0, color: "#10b981" };
    assert_eq!(bucket_share(&bucket, &[]), 0);
}

// =============================================================
// Reports
// =============================================================

#[test]
fn report_counts_classify_risk_levels() {
    let analyses = vec![
        record("a", Some("Critical")),
        record("b", Some("High")),
        record("c", Some("Medium")),
        record("d", Some("Low")),
        record("e", None),
        record("f", Some("Unknown")),
    ];
    assert_eq!(report_counts(&analyses), ReportCounts { total: 6, high_risk: 2, low_risk: 1 });
}

#[test]
fn report_counts_of_empty_history() {
    assert_eq!(report_counts(&fallback_analyses()), ReportCounts::default());
}

// =============================================================
// Demo data
// =============================================================

#[test]
fn fallback_datasets_are_consistent() {
    let stats = fallback_dashboard_stats();
    let plots = fallback_plots();
    assert_eq!(stats.total_plots, plots.len() as u64);
    let compliant = plots.iter().filter(|p| p.status == COMPLIANT_STATUS).count() as u64;
    assert_eq!(stats.compliant, compliant);
    assert_eq!(stats.violations_detected, stats.total_plots - compliant);
    let dues = plots.iter().filter(|p| p.lease_status.as_deref() == Some("Dues Pending")).count() as u64;
    assert_eq!(stats.pending_dues, dues);
}
