//! Runtime configuration for the bridge.
//!
//! Settings are resolved from a key/value source (normally the process
//! environment) and then overridden by command-line flags.

use std::time::Duration;

use nim_acp_common::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PROMPT_TIMEOUT_SECS, list_model_aliases,
    lookup_model_alias, resolve_model_alias,
};

use crate::error::ConfigError;

/// Environment variable holding the bearer credential.
pub const API_KEY_ENV: &str = "NVIDIA_API_KEY";
/// Environment variable holding the model id or preset name.
pub const MODEL_ENV: &str = "NVIDIA_MODEL";
/// Environment variable overriding the upstream base URL.
pub const BASE_URL_ENV: &str = "NVIDIA_BASE_URL";

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream model identifier sent with every request.
    pub model: String,
    /// Bearer credential. `None` means prompts are rejected with a configuration error.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Upper bound for one prompt round-trip.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key/value source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(model) = get(MODEL_ENV) {
            config.model = resolve_model_alias(&model).to_string();
        }
        config.api_key = get(API_KEY_ENV);
        if let Some(base_url) = get(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config
    }

    /// Override the model; preset names are resolved to their upstream id.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = resolve_model_alias(model).to_string();
        self
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the prompt timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether a non-empty credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Resolve a preset name strictly: unknown names are an error.
pub fn resolve_preset(name: &str) -> Result<&'static str, ConfigError> {
    lookup_model_alias(name).ok_or_else(|| ConfigError::UnknownPreset {
        name: name.to_string(),
        available: available_presets(),
    })
}

/// Comma-separated preset names, in table order.
pub fn available_presets() -> String {
    list_model_aliases()
        .iter()
        .map(|a| a.alias)
        .collect::<Vec<_>>()
        .join(", ")
}
