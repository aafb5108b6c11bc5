//! Inline notice for list screens showing offline demo data or a fetch error.
//!
//! Demo data is labelled only when `show_label` is set; by default the
//! substitution stays invisible to the user.

#[cfg(all(test, feature = "ssr"))]
#[path = "data_source_notice_test.rs"]
mod data_source_notice_test;

use leptos::prelude::*;

use crate::net::api::DataSource;

pub const OFFLINE_DEMO_LABEL: &str = "Offline demo data";

/// Renders nothing for live data without errors.
#[component]
pub fn DataSourceNotice(
    #[prop(into)] source: Signal<DataSource>,
    #[prop(into)] error: Signal<Option<String>>,
    /// Label demo data as such.
    show_label: bool,
) -> impl IntoView {
    view! {
        <Show when=move || show_label && source.get() == DataSource::Fallback>
            <div class="header-badge header-badge--offline" title="The analysis service could not be reached">
                {OFFLINE_DEMO_LABEL}
            </div>
        </Show>
        <Show when=move || error.get().is_some()>
            <div class="risk-meter critical list-error">
                <div class="risk-label">"Error"</div>
                <div class="risk-desc">{move || error.get().unwrap_or_default()}</div>
            </div>
        </Show>
    }
}
