//! Tabbed image views of a finished analysis.
//!
//! Tab switches only write the local `ResultTab` signal; all four views come
//! from the already-decoded result.

#[cfg(all(test, feature = "ssr"))]
#[path = "result_tabs_test.rs"]
mod result_tabs_test;

use leptos::prelude::*;

use crate::net::types::AnalysisResult;
use crate::state::results::{ResultTab, tab_images};

#[component]
pub fn ResultTabs(result: AnalysisResult, tab: RwSignal<ResultTab>) -> impl IntoView {
    view! {
        <div class="card animate-in result-tabs">
            <div class="card-header">
                <h3>"Visual Analysis Results"</h3>
            </div>
            <div class="card-body">
                <div class="tabs" role="tablist">
                    {ResultTab::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tab"
                                    class:active=move || tab.get() == t
                                    role="tab"
                                    aria-selected=move || (tab.get() == t).to_string()
                                    data-tab=t.id()
                                    on:click=move |_| {
                                        if tab.get_untracked() != t {
                                            tab.set(t);
                                        }
                                    }
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                {move || {
                    let current = tab.get();
                    let panels = tab_images(&result, current)
                        .into_iter()
                        .map(|(panel, src)| {
                            view! {
                                <div class="result-image-container">
                                    <img src=src alt=panel.alt/>
                                    <div class="result-image-label">{panel.caption}</div>
                                </div>
                            }
                        })
                        .collect_view();
                    view! { <div class:results-grid=current.is_split()>{panels}</div> }
                }}
            </div>
        </div>
    }
}
