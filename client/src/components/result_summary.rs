//! Risk banner and stat tiles for a finished analysis.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::state::results::ResultSummaryView;

const TILE_GLYPHS: [&str; 4] = ["⚠", "◆", "◉", "✓"];

#[component]
pub fn ResultSummary(summary: ResultSummaryView) -> impl IntoView {
    let ResultSummaryView { headline, description, meter_class, color, tiles } = summary;

    view! {
        <div class=format!("{meter_class} animate-in")>
            <span class="risk-icon" style:color=color aria-hidden="true">"⚠"</span>
            <div>
                <div class="risk-label" style:color=color>{headline}</div>
                <div class="risk-desc">{description}</div>
            </div>
        </div>
        <div class="stats-grid stats-grid--four">
            {tiles
                .into_iter()
                .zip(TILE_GLYPHS)
                .map(|(tile, glyph)| view! { <StatCard value=tile.value label=tile.label tone=tile.tone glyph=glyph/> })
                .collect_view()}
        </div>
    }
}
