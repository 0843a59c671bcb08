//! Wire types for the OpenAI-compatible chat-completions API.

use serde::{Deserialize, Serialize};

use crate::acp::types::StopReason;

/// Generation ceiling sent with every request.
pub const MAX_TOKENS: u32 = 32768;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 1.0;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Chat message for completions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: ChatRole,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    /// Build a non-streaming request with the fixed generation settings.
    pub fn new(model: &'a str, messages: &'a [ChatMessage]) -> Self {
        Self {
            model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        }
    }
}

/// Message of a response choice. Every field is optional so shape checks
/// happen explicitly rather than in the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Choice in a chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    /// Reason for finishing (stop, length, etc.)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Usage statistics for a completion
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// The part of an upstream reply the protocol cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub text: String,
    /// Reasoning trace, when the model exposes one.
    pub reasoning: Option<String>,
    pub stop_reason: StopReason,
}

impl CompletionResult {
    /// The result of a prompt that produced no messages.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            reasoning: None,
            stop_reason: StopReason::EndTurn,
        }
    }
}

/// Map an upstream `finish_reason` to the protocol stop reason.
pub fn stop_reason_from_finish(finish_reason: Option<&str>) -> StopReason {
    match finish_reason {
        Some("length") => StopReason::MaxTokens,
        _ => StopReason::EndTurn,
    }
}
