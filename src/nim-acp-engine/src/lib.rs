//! nim-acp engine.
//!
//! Speaks the Agent Client Protocol over newline-delimited JSON and forwards
//! prompts to an OpenAI-compatible chat-completions endpoint.

pub mod acp;
pub mod config;
pub mod error;
pub mod gateway;

pub use config::Config;
pub use error::{ConfigError, GatewayError, Result};
pub use gateway::{CompletionGateway, CompletionResult, NimClient};
