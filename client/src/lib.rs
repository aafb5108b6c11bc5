//! # landwatch-client
//!
//! Leptos + WASM frontend for LandWatch, the industrial land monitoring
//! console. Users stage a reference map and a current image, submit them to
//! the analysis service, and review the detected deviations; read-only
//! screens list the plot registry, dashboard counters, and past analyses.
//!
//! This crate contains pages, components, application state, network types,
//! and the analysis submitter. The workflow state (`state::*`) is plain Rust
//! and is tested natively without a browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
