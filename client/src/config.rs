use std::{fmt, time::Duration};

use serde::Deserialize;

/// Production endpoint used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration options for the DeepSeek client
///
/// Only the API key is required. Everything else falls back to a default
/// when the client is built.
#[derive(Default, Clone, Deserialize)]
pub struct Config {
    /// DeepSeek API key, sent as a bearer token
    pub api_key: String,
    /// API base URL, without the `/chat/completions` suffix
    #[serde(default)]
    pub base_url: Option<String>,
    /// How many times a transport failure is retried after the first attempt
    #[serde(default)]
    pub max_retries: u32,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Creates a configuration with the given API key and default values
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// The base URL the client will talk to, without a trailing slash.
    pub fn effective_base_url(&self) -> String {
        let base_url = self
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        base_url.trim().trim_end_matches('/').to_string()
    }

    /// The per-request timeout. A zero timeout counts as unset.
    pub fn effective_timeout(&self) -> Duration {
        let secs = self
            .timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
