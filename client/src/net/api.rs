//! REST helpers for the read-only list screens and shared endpoint config.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the fetchers resolve immediately as failed requests, so
//! the page renders its loading/fallback state and hydration refetches.
//!
//! ERROR HANDLING
//! ==============
//! List screens are non-critical. With `offline_fallback` on (the default)
//! a failed fetch substitutes the fixed demo dataset and tags it
//! `DataSource::Fallback`; with it off the failure is returned to the page.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AnalysisRecord, DashboardStats, PlotRecord};
#[cfg(feature = "hydrate")]
use super::types::{AnalysesEnvelope, PlotsEnvelope};
use crate::state::registry::{fallback_analyses, fallback_dashboard_stats, fallback_plots};

/// Default analysis-service origin when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const DASHBOARD_STATS_PATH: &str = "/api/dashboard/stats";
pub const PLOTS_PATH: &str = "/api/plots";
pub const ANALYSES_PATH: &str = "/api/analyses";

/// `<meta>` names used to hand the config from the SSR shell to hydration.
pub const META_API_BASE: &str = "landwatch-api-base";
pub const META_OFFLINE_FALLBACK: &str = "landwatch-offline-fallback";
pub const META_FALLBACK_LABEL: &str = "landwatch-fallback-label";

/// Where the analysis service lives and how list failures are handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Service origin without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Substitute demo data when a list fetch fails.
    pub offline_fallback: bool,
    /// Mark substituted demo data on screen. Off unless the operator opted
    /// into the offline mode explicitly; the substitution is silent otherwise.
    pub label_fallback: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned(), offline_fallback: true, label_fallback: false }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, offline_fallback: bool) -> Self {
        Self { base_url: base_url.trim().trim_end_matches('/').to_owned(), offline_fallback, label_fallback: false }
    }

    #[must_use]
    pub fn with_fallback_label(mut self, label_fallback: bool) -> Self {
        self.label_fallback = label_fallback;
        self
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build from the `<meta>` values rendered by the shell. Missing or
    /// blank values keep their defaults.
    pub fn from_meta(base_url: Option<&str>, offline_fallback: Option<&str>, label_fallback: Option<&str>) -> Self {
        let defaults = Self::default();
        let base_url = base_url.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(&defaults.base_url);
        let offline_fallback = offline_fallback.map_or(defaults.offline_fallback, parse_flag);
        let label_fallback = label_fallback.map_or(defaults.label_fallback, parse_flag);
        Self::new(base_url, offline_fallback).with_fallback_label(label_fallback)
    }

    /// Read the config back from the hydrated document.
    pub fn from_document() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let read = |name: &str| {
                web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.query_selector(&format!("meta[name=\"{name}\"]")).ok().flatten())
                    .and_then(|el| el.get_attribute("content"))
            };
            Self::from_meta(
                read(META_API_BASE).as_deref(),
                read(META_OFFLINE_FALLBACK).as_deref(),
                read(META_FALLBACK_LABEL).as_deref(),
            )
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }
}

/// Parse a boolean flag the way env/meta values are written.
pub fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off")
}

// =============================================================================
// LISTINGS
// =============================================================================

/// Origin of the data a list screen shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    Live,
    Fallback,
}

/// Data for a list screen plus where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    pub data: T,
    pub source: DataSource,
}

/// Combine a fetch outcome with the fallback policy.
///
/// # Errors
///
/// Returns the fetch error only when `offline_fallback` is off.
pub fn resolve_listing<T>(
    fetched: Result<T, String>,
    offline_fallback: bool,
    fallback: impl FnOnce() -> T,
) -> Result<Listing<T>, String> {
    match fetched {
        Ok(data) => Ok(Listing { data, source: DataSource::Live }),
        Err(e) if offline_fallback => {
            log::info!("list fetch failed, using offline demo data: {e}");
            Ok(Listing { data: fallback(), source: DataSource::Fallback })
        }
        Err(e) => {
            log::warn!("list fetch failed: {e}");
            Err(e)
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(path: &str, status: u16) -> String {
    format!("GET {path} failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(config: &ApiConfig, path: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(&config.endpoint(path))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(path, resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
fn not_in_browser<T>(path: &str) -> Result<T, String> {
    Err(format!("GET {path}: not available on server"))
}

/// Dashboard stats and plot list. Fetched together; if either request fails
/// both are replaced by the fallback datasets.
///
/// # Errors
///
/// Returns an error string only when `offline_fallback` is off.
pub async fn fetch_dashboard(config: &ApiConfig) -> Result<Listing<(DashboardStats, Vec<PlotRecord>)>, String> {
    #[cfg(feature = "hydrate")]
    let fetched = {
        let (stats, plots) = futures::join!(
            get_json::<DashboardStats>(config, DASHBOARD_STATS_PATH),
            get_json::<PlotsEnvelope>(config, PLOTS_PATH),
        );
        stats.and_then(|s| plots.map(|p| (s, p.plots)))
    };
    #[cfg(not(feature = "hydrate"))]
    let fetched = not_in_browser(DASHBOARD_STATS_PATH);

    resolve_listing(fetched, config.offline_fallback, || (fallback_dashboard_stats(), fallback_plots()))
}

/// Full plot registry.
///
/// # Errors
///
/// Returns an error string only when `offline_fallback` is off.
pub async fn fetch_plots(config: &ApiConfig) -> Result<Listing<Vec<PlotRecord>>, String> {
    #[cfg(feature = "hydrate")]
    let fetched = get_json::<PlotsEnvelope>(config, PLOTS_PATH).await.map(|env| env.plots);
    #[cfg(not(feature = "hydrate"))]
    let fetched = not_in_browser(PLOTS_PATH);

    resolve_listing(fetched, config.offline_fallback, fallback_plots)
}

/// Analysis history.
///
/// # Errors
///
/// Returns an error string only when `offline_fallback` is off.
pub async fn fetch_analyses(config: &ApiConfig) -> Result<Listing<Vec<AnalysisRecord>>, String> {
    #[cfg(feature = "hydrate")]
    let fetched = get_json::<AnalysesEnvelope>(config, ANALYSES_PATH).await.map(|env| env.analyses);
    #[cfg(not(feature = "hydrate"))]
    let fetched = not_in_browser(ANALYSES_PATH);

    resolve_listing(fetched, config.offline_fallback, fallback_analyses)
}
