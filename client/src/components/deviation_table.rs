//! Table of detected deviations with a local review flag per row.

#[cfg(all(test, feature = "ssr"))]
#[path = "deviation_table_test.rs"]
mod deviation_table_test;

use leptos::prelude::*;

use crate::state::results::{DeviationRow, ReviewFlags, flagged_summary};

#[component]
pub fn DeviationTable(rows: Vec<DeviationRow>, flags: RwSignal<ReviewFlags>) -> impl IntoView {
    view! {
        <div class="card animate-in">
            <div class="card-header">
                <h3>"Detected Deviations"</h3>
                {move || flags.with(flagged_summary).map(|text| view! { <span class="header-badge">{text}</span> })}
            </div>
            <div class="card-body card-body--flush">
                <table class="deviation-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Type"</th>
                            <th>"Severity"</th>
                            <th>"Area (px)"</th>
                            <th>"Location"</th>
                            <th>"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| {
                                let id = row.id.clone();
                                let flag_id = row.id.clone();
                                let flagged = move || flags.with(|f| f.is_flagged(&id));
                                let row_flagged = flagged.clone();
                                view! {
                                    <tr class:flagged=row_flagged>
                                        <td class="cell-strong">{row.id}</td>
                                        <td>{row.kind}</td>
                                        <td>
                                            <span class=row.badge_class>{row.severity}</span>
                                        </td>
                                        <td>{row.area}</td>
                                        <td class="cell-muted">{row.location}</td>
                                        <td>
                                            <button
                                                class="badge badge-info badge-button"
                                                on:click=move |_| {
                                                    flags.update(|f| {
                                                        f.toggle(&flag_id);
                                                    });
                                                }
                                            >
                                                {move || if flagged() { "Flagged" } else { "Flag for Review" }}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
