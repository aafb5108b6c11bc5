//! Application sidebar with brand and route navigation.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

/// Navigation entries: route path and label.
pub const NAV_ITEMS: [(&str, &str); 4] = [
    ("/", "Dashboard"),
    ("/analyze", "Analyze Images"),
    ("/plots", "Plot Registry"),
    ("/reports", "Reports"),
];

/// Whether `item` is the active entry for `pathname`.
pub fn nav_item_active(item: &str, pathname: &str) -> bool {
    let pathname = pathname.trim_end_matches('/');
    if item == "/" { pathname.is_empty() } else { pathname == item }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <div class="sidebar-logo">
                    <div class="logo-icon" aria-hidden="true">"⛨"</div>
                    <div>
                        <h1>"LandWatch"</h1>
                        <p>"CSIDC Monitoring"</p>
                    </div>
                </div>
            </div>
            <nav class="sidebar-nav">
                {NAV_ITEMS
                    .into_iter()
                    .map(|(href, label)| {
                        let active = move || nav_item_active(href, &pathname.get());
                        view! {
                            <A href=href attr:class=move || if active() { "nav-item active" } else { "nav-item" }>
                                {label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="sidebar-footer">"CSIDC Land Monitoring System v1.0"</div>
        </aside>
    }
}
