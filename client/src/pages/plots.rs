//! Plot registry page with search and compliance filter.

use leptos::prelude::*;

use crate::components::data_source_notice::DataSourceNotice;
use crate::net::api::ApiConfig;
use crate::state::registry::{PlotFilter, PlotsState};
use crate::util::badge::{lease_badge_class, lease_status_label, plot_status_badge_class};
use crate::util::format::{count_or_missing, or_missing};

const GIS_PORTAL_URL: &str = "https://cggis.cgstate.gov.in/csidc/";

#[component]
pub fn PlotsPage() -> impl IntoView {
    let api = expect_context::<ApiConfig>();
    let show_label = api.label_fallback;
    let plots = RwSignal::new(PlotsState::default());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let outcome = crate::net::api::fetch_plots(&api).await;
        let _ = plots.try_update(|s| s.list.apply(outcome));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = api;

    view! {
        <header class="page-header">
            <div>
                <h2>"Plot Registry"</h2>
                <p>"Complete inventory of monitored industrial land parcels"</p>
            </div>
            <div class="header-actions">
                <DataSourceNotice
                    show_label=show_label
                    source=Signal::derive(move || plots.with(|s| s.list.source))
                    error=Signal::derive(move || plots.with(|s| s.list.error.clone()))
                />
                <a href=GIS_PORTAL_URL target="_blank" rel="noopener noreferrer" class="btn btn-secondary">
                    "CSIDC GIS Portal ↗"
                </a>
            </div>
        </header>

        <div class="page-body">
            <div class="filter-bar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by Plot ID, area name, or lessee..."
                    prop:value=move || plots.with(|s| s.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        plots.update(|s| s.search = value);
                    }
                />
                <select
                    class="filter-select"
                    prop:value=move || plots.with(|s| s.filter.value())
                    on:change=move |ev| {
                        let filter = PlotFilter::from_value(&event_target_value(&ev));
                        plots.update(|s| s.filter = filter);
                    }
                >
                    {PlotFilter::ALL
                        .into_iter()
                        .map(|f| view! { <option value=f.value()>{f.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="card animate-in">
                <div class="card-body card-body--flush">
                    <Show
                        when=move || !plots.with(|s| s.list.loading)
                        fallback=|| view! { <p class="loading">"Loading plots..."</p> }
                    >
                        <table class="plots-table">
                            <thead>
                                <tr>
                                    <th>"Plot ID"</th>
                                    <th>"Industrial Area / Plot"</th>
                                    <th>"Lessee"</th>
                                    <th>"Area (sqm)"</th>
                                    <th>"Allotment Date"</th>
                                    <th>"Last Inspection"</th>
                                    <th>"Lease Status"</th>
                                    <th>"Compliance Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    plots
                                        .with(|s| s.visible().into_iter().cloned().collect::<Vec<_>>())
                                        .into_iter()
                                        .map(|plot| {
                                            let lease = plot.lease_status.as_deref();
                                            let lease_class = lease_badge_class(lease);
                                            let lease_label = lease_status_label(lease).to_owned();
                                            let status_class = plot_status_badge_class(&plot.status);
                                            let allotted = or_missing(plot.allotment_date.as_deref()).to_owned();
                                            let inspected = or_missing(plot.last_inspection.as_deref()).to_owned();
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">{plot.id}</td>
                                                    <td>{plot.name}</td>
                                                    <td>{plot.lessee.unwrap_or_default()}</td>
                                                    <td>{count_or_missing(plot.area_sqm)}</td>
                                                    <td>{allotted}</td>
                                                    <td>{inspected}</td>
                                                    <td>
                                                        <span class=lease_class>{lease_label}</span>
                                                    </td>
                                                    <td>
                                                        <span class=status_class>{plot.status}</span>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </Show>
                </div>
            </div>
        </div>
    }
}
