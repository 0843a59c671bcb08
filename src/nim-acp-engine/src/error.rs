//! Error types for the nim-acp engine.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure of a single upstream completion attempt.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Upstream request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Upstream returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Classify a reqwest failure that happened before a status was received.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Whether this failure is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Configuration errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown model preset '{name}'. Available presets: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
