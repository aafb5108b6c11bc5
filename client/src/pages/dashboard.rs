//! Dashboard page: headline counters, status distribution, and a plot preview.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stats and plots are requested once after hydration. During SSR the page
//! renders its loading state only.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::data_source_notice::DataSourceNotice;
use crate::components::stat_card::StatCard;
use crate::net::api::ApiConfig;
use crate::net::types::DashboardStats;
use crate::state::registry::{DashboardState, bucket_share, status_distribution};
use crate::util::badge::plot_status_badge_class;
use crate::util::format::count_or_missing;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = expect_context::<ApiConfig>();
    let show_label = api.label_fallback;
    let dashboard = RwSignal::new(DashboardState::default());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let outcome = crate::net::api::fetch_dashboard(&api).await;
        let _ = dashboard.try_update(|s| s.apply(outcome));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = api;

    let stat = move |pick: fn(&DashboardStats) -> u64| {
        Signal::derive(move || dashboard.with(|s| pick(&s.data.0).to_string()))
    };

    view! {
        <header class="page-header">
            <div>
                <h2>"Dashboard"</h2>
                <p>"CSIDC Industrial Land Monitoring Overview"</p>
            </div>
            <div class="header-actions">
                <DataSourceNotice
                    show_label=show_label
                    source=Signal::derive(move || dashboard.with(|s| s.source))
                    error=Signal::derive(move || dashboard.with(|s| s.error.clone()))
                />
                <div class="header-badge">
                    <span class="pulse-dot"></span>
                    "System Active"
                </div>
                <A href="/analyze" attr:class="btn btn-primary">
                    "New Analysis"
                </A>
            </div>
        </header>

        <div class="page-body">
            <div class="stats-grid">
                <StatCard value=stat(|s| s.total_plots) label="Total Plots Monitored" tone="blue" glyph="⌖"/>
                <StatCard value=stat(|s| s.compliant) label="Compliant Plots" tone="green" glyph="✓"/>
                <StatCard value=stat(|s| s.violations_detected) label="Violations Detected" tone="red" glyph="⚠"/>
                <StatCard
                    value=stat(|s| s.unauthorized_construction)
                    label="Unauthorized Construction"
                    tone="amber"
                    glyph="▲"
                />
            </div>

            <Show
                when=move || !dashboard.with(|s| s.loading)
                fallback=|| view! { <p class="loading">"Loading dashboard..."</p> }
            >
                <div class="content-grid">
                    <div class="card animate-in">
                        <div class="card-header">
                            <h3>"Compliance Overview"</h3>
                        </div>
                        <div class="card-body">
                            <p class="section-caption">"Status Distribution"</p>
                            <ul class="distribution">
                                {move || {
                                    let buckets = dashboard.with(|s| status_distribution(&s.data.0));
                                    buckets
                                        .iter()
                                        .map(|bucket| {
                                            let share = bucket_share(bucket, &buckets);
                                            view! {
                                                <li class="distribution__item">
                                                    <span class="distribution__dot" style:background=bucket.color></span>
                                                    <span class="distribution__name">{bucket.name}</span>
                                                    <span class="distribution__bar">
                                                        <span
                                                            class="distribution__fill"
                                                            style:width=format!("{share}%")
                                                            style:background=bucket.color
                                                        ></span>
                                                    </span>
                                                    <span class="distribution__value">{bucket.value}</span>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </div>
                    </div>

                    <div class="card animate-in">
                        <div class="card-header">
                            <h3>"Plot Registry"</h3>
                            <A href="/plots" attr:class="btn btn-secondary">
                                "View All"
                            </A>
                        </div>
                        <div class="card-body card-body--flush">
                            <table class="plots-table">
                                <thead>
                                    <tr>
                                        <th>"Plot ID"</th>
                                        <th>"Industrial Area"</th>
                                        <th>"Lessee"</th>
                                        <th>"Area (sqm)"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || {
                                        dashboard
                                            .with(|s| s.data.1.clone())
                                            .into_iter()
                                            .map(|plot| {
                                                let badge = plot_status_badge_class(&plot.status);
                                                view! {
                                                    <tr>
                                                        <td class="cell-strong">{plot.id}</td>
                                                        <td>{plot.name}</td>
                                                        <td>{plot.lessee.unwrap_or_default()}</td>
                                                        <td>{count_or_missing(plot.area_sqm)}</td>
                                                        <td>
                                                            <span class=badge>{plot.status}</span>
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
