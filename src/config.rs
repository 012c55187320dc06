//! Runtime configuration.
//!
//! Configuration is via environment variables:
//! - `SHORTNOTES_API_KEY` - Gemini API key (falls back to `GEMINI_API_KEY`, then `API_KEY`)
//! - `SHORTNOTES_MODEL` - Model name (default: `gemini-3-flash-preview`)
//! - `SHORTNOTES_GEMINI_URL` - API base URL (default: `https://generativelanguage.googleapis.com/v1beta`)
//! - `SHORTNOTES_TEMPERATURE` - Sampling temperature (default: `0.7`)
//! - `SHORTNOTES_TIMEOUT_SECS` - Request timeout for generation calls (default: `60`)
//! - `SHORTNOTES_DB` - Database file (default: platform data directory)

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const API_KEY_VARS: [&str; 3] = ["SHORTNOTES_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub request_timeout: Duration,
    /// `None` means the platform default location.
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            database_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset. Unparseable numbers keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_key = API_KEY_VARS.iter().find_map(|key| get(*key));

        let temperature = match get("SHORTNOTES_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().unwrap_or_else(|_| {
                tracing::warn!("Invalid SHORTNOTES_TEMPERATURE `{}`, using default", raw);
                defaults.temperature
            }),
            None => defaults.temperature,
        };

        let request_timeout = match get("SHORTNOTES_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .unwrap_or_else(|_| {
                    tracing::warn!("Invalid SHORTNOTES_TIMEOUT_SECS `{}`, using default", raw);
                    defaults.request_timeout
                }),
            None => defaults.request_timeout,
        };

        Self {
            api_key,
            model: get("SHORTNOTES_MODEL").unwrap_or(defaults.model),
            base_url: get("SHORTNOTES_GEMINI_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            temperature,
            request_timeout,
            database_path: get("SHORTNOTES_DB").map(PathBuf::from),
        }
    }
}
