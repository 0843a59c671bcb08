//! Completion gateway: one request to the upstream chat endpoint per prompt.

mod client;
mod models;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use client::NimClient;
pub use models::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatRole, ChoiceMessage,
    CompletionResult, MAX_TOKENS, TEMPERATURE, Usage, stop_reason_from_finish,
};

/// Upstream chat-completion backend.
///
/// Implementations make exactly one attempt; retries are the caller's concern.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        credential: &str,
        timeout: Duration,
    ) -> Result<CompletionResult>;
}
