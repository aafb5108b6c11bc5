//! Single-figure stat tile used by the dashboard, reports, and result summary.

use leptos::prelude::*;

/// Tile with a tinted icon slot, a value, and a label.
#[component]
pub fn StatCard(
    #[prop(into)] value: Signal<String>,
    label: &'static str,
    /// Icon tint class: `red`, `amber`, `blue`, or `green`.
    tone: &'static str,
    #[prop(default = "●")] glyph: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat-card animate-in">
            <div class=format!("stat-icon {tone}") aria-hidden="true">{glyph}</div>
            <div class="stat-value">{move || value.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
