//! Server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Parsing runs over a lookup function instead of `std::env` directly so the
//! rules are testable without mutating process state. `from_env` is the thin
//! wrapper used by `main`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("LANDWATCH_ANALYSIS_URL must start with http:// or https://: {0}")]
    InvalidAnalysisUrl(String),
    #[error("invalid LANDWATCH_OFFLINE_FALLBACK: {0}")]
    InvalidFlag(String),
    #[error("invalid LANDWATCH_PROBE_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Analysis service base URL without a trailing slash.
    pub analysis_url: String,
    /// When false, list screens show an error instead of demo data.
    pub offline_fallback: bool,
    /// Demo data is labelled on screen only when the operator set
    /// `LANDWATCH_OFFLINE_FALLBACK` explicitly.
    pub label_fallback: bool,
    pub probe_timeout: Duration,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LANDWATCH_ANALYSIS_URL`: default `http://localhost:8000`
    /// - `LANDWATCH_OFFLINE_FALLBACK`: `true` (default) or `false`; setting it
    ///   at all also labels demo data on screen
    /// - `LANDWATCH_PROBE_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let analysis_url = parse_analysis_url(non_empty(lookup("LANDWATCH_ANALYSIS_URL")).as_deref())?;

        let (offline_fallback, label_fallback) = match non_empty(lookup("LANDWATCH_OFFLINE_FALLBACK")) {
            Some(raw) => (parse_bool(&raw).ok_or(ConfigError::InvalidFlag(raw))?, true),
            None => (true, false),
        };

        let probe_timeout_secs = match non_empty(lookup("LANDWATCH_PROBE_TIMEOUT_SECS")) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_PROBE_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            analysis_url,
            offline_fallback,
            label_fallback,
            probe_timeout: Duration::from_secs(probe_timeout_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_analysis_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let url = raw.unwrap_or(DEFAULT_ANALYSIS_URL).trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_owned())
    } else {
        Err(ConfigError::InvalidAnalysisUrl(url.to_owned()))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
