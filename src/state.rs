//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed configuration and one pooled HTTP client used for the
//! readiness probe. Analyses themselves never pass through the server.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use landwatch_client::net::api::ApiConfig;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state with a probe client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialized.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.probe_timeout).build()?;
        Ok(Self { config: Arc::new(config), http })
    }

    /// Client-side view of the configuration written into the HTML shell.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.config.analysis_url, self.config.offline_fallback)
            .with_fallback_label(self.config.label_fallback)
    }
}
