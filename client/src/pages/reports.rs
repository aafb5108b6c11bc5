//! Reports page: analysis history and risk counters.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::components::data_source_notice::DataSourceNotice;
use crate::components::stat_card::StatCard;
use crate::net::api::ApiConfig;
use crate::net::types::AnalysisRecord;
use crate::state::registry::{ReportCounts, ReportsState, report_counts};
use crate::util::badge::severity_badge_class;
use crate::util::format::{MISSING, count_or_missing, or_missing, percentage_or_missing};

/// Cells of one history row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub id: String,
    pub reference_file: String,
    pub current_file: String,
    pub deviations: String,
    pub change: String,
    pub risk: String,
    pub risk_class: &'static str,
    pub analyzed_at: String,
}

impl ReportRow {
    pub fn from_record(record: &AnalysisRecord) -> Self {
        let summary = record.summary.clone().unwrap_or_default();
        let (risk, risk_class) = match record.risk_level() {
            Some(level) => (level.label().to_owned(), severity_badge_class(level)),
            None => ("Unknown".to_owned(), "badge badge-low"),
        };
        Self {
            id: record.result_id.clone(),
            reference_file: or_missing(record.reference_file.as_deref()).to_owned(),
            current_file: or_missing(record.current_file.as_deref()).to_owned(),
            deviations: count_or_missing(summary.total_deviations),
            change: percentage_or_missing(summary.change_percentage),
            risk,
            risk_class,
            analyzed_at: record.analyzed_at.as_deref().map_or_else(|| MISSING.to_owned(), format_timestamp),
        }
    }
}

/// `2025-11-20T14:03:12.123456` -> `2025-11-20 14:03:12`.
fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.split('.').next().unwrap_or(raw);
    trimmed.replacen('T', " ", 1)
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = expect_context::<ApiConfig>();
    let show_label = api.label_fallback;
    let reports = RwSignal::new(ReportsState::default());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let outcome = crate::net::api::fetch_analyses(&api).await;
        let _ = reports.try_update(|s| s.apply(outcome));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = api;

    let counts = Memo::new(move |_| reports.with(|s| report_counts(&s.data)));
    let count = move |pick: fn(ReportCounts) -> usize| Signal::derive(move || pick(counts.get()).to_string());

    view! {
        <header class="page-header">
            <div>
                <h2>"Reports & Analysis History"</h2>
                <p>"View past analyses and generate compliance reports"</p>
            </div>
            <div class="header-actions">
                <DataSourceNotice
                    show_label=show_label
                    source=Signal::derive(move || reports.with(|s| s.source))
                    error=Signal::derive(move || reports.with(|s| s.error.clone()))
                />
            </div>
        </header>

        <div class="page-body">
            <div class="stats-grid stats-grid--three">
                <StatCard value=count(|c| c.total) label="Total Analyses" tone="blue" glyph="▤"/>
                <StatCard value=count(|c| c.high_risk) label="High Risk Findings" tone="red" glyph="⚠"/>
                <StatCard value=count(|c| c.low_risk) label="Low Risk" tone="green" glyph="✓"/>
            </div>

            {move || {
                if reports.with(|s| s.loading) {
                    return view! { <p class="loading">"Loading reports..."</p> }.into_any();
                }
                let rows: Vec<ReportRow> = reports.with(|s| s.data.iter().map(ReportRow::from_record).collect());
                if rows.is_empty() {
                    return view! {
                        <div class="card">
                            <div class="empty-state">
                                <h3>"No Analysis Reports Yet"</h3>
                                <p>
                                    "Run your first image comparison analysis to generate reports. Upload a reference allotment map and a current satellite image on the \"Analyze Images\" page."
                                </p>
                            </div>
                        </div>
                    }
                        .into_any();
                }
                view! {
                    <div class="card animate-in">
                        <div class="card-header">
                            <h3>"Analysis History"</h3>
                        </div>
                        <div class="card-body card-body--flush">
                            <table class="plots-table">
                                <thead>
                                    <tr>
                                        <th>"Report ID"</th>
                                        <th>"Reference File"</th>
                                        <th>"Current File"</th>
                                        <th>"Deviations"</th>
                                        <th>"Change %"</th>
                                        <th>"Risk Level"</th>
                                        <th>"Date"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">{row.id}</td>
                                                    <td>{row.reference_file}</td>
                                                    <td>{row.current_file}</td>
                                                    <td>{row.deviations}</td>
                                                    <td>{row.change}</td>
                                                    <td>
                                                        <span class=row.risk_class>{row.risk}</span>
                                                    </td>
                                                    <td class="cell-muted">{row.analyzed_at}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}

