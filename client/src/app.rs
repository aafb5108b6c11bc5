//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::sidebar::Sidebar;
use crate::net::api::{ApiConfig, META_API_BASE, META_FALLBACK_LABEL, META_OFFLINE_FALLBACK};
use crate::pages::{analyze::AnalyzePage, dashboard::DashboardPage, plots::PlotsPage, reports::ReportsPage};

/// HTML shell rendered on the server for SSR + hydration.
///
/// `api` is provided as context for the server render and written into
/// `<meta>` tags so the hydrated app picks up the same configuration.
pub fn shell(options: LeptosOptions, api: ApiConfig) -> impl IntoView {
    let base_url = api.base_url.clone();
    let offline_fallback = api.offline_fallback.to_string();
    let label_fallback = api.label_fallback.to_string();
    provide_context(api);

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=META_API_BASE content=base_url/>
                <meta name=META_OFFLINE_FALLBACK content=offline_fallback/>
                <meta name=META_FALLBACK_LABEL content=label_fallback/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the API configuration and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_document);
    log::debug!("app: analysis service at {} (offline fallback {})", api.base_url, api.offline_fallback);
    provide_context(api);

    view! {
        <Stylesheet id="leptos" href="/pkg/landwatch.css"/>
        <Title text="LandWatch"/>

        <Router>
            <div class="app-container">
                <Sidebar/>
                <main class="main-content">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=DashboardPage/>
                        <Route path=StaticSegment("analyze") view=AnalyzePage/>
                        <Route path=StaticSegment("plots") view=PlotsPage/>
                        <Route path=StaticSegment("reports") view=ReportsPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
