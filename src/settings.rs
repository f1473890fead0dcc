//! Server settings loaded from the environment.
//!
//! The binary calls `dotenvy::dotenv()` first, so every key below can also
//! come from a `.env` file in the working directory.

use std::env;

use crate::model::{
    ModelConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_MODEL_NAME,
};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Gemini API key. `None` leaves the proxy unconfigured.
    pub api_key: Option<String>,
    /// Gemini model name
    pub model_name: String,
    /// Gemini API base URL
    pub base_url: String,
    /// Maximum attempts per model call
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    pub initial_backoff_ms: u64,
    /// Bind address
    pub host: String,
    /// Listening port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to the defaults. Blank strings
    /// count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_key: get("GEMINI_API_KEY"),
            model_name: get("GEMINI_MODEL").unwrap_or(defaults.model_name),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            max_retries: get("GEMINI_MAX_RETRIES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
            initial_backoff_ms: get("GEMINI_BACKOFF_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_backoff_ms),
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Model configuration, or `None` when no API key is set.
    pub fn model_config(&self) -> Option<ModelConfig> {
        self.api_key.as_ref().map(|key| {
            ModelConfig::default()
                .with_base_url(&self.base_url)
                .with_api_key(key)
                .with_model_name(&self.model_name)
        })
    }

    /// Retry policy for model calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_initial_backoff_ms(self.initial_backoff_ms)
    }

    /// Host and port to listen on, in the form `TcpListener::bind` resolves.
    ///
    /// The host may be an IPv4 or IPv6 literal (`0.0.0.0`, `::`) or a
    /// hostname such as `localhost`.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
