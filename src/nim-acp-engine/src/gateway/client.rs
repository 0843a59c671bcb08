//! NVIDIA NIM client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::CompletionGateway;
use super::models::{ChatMessage, ChatRequest, ChatResponse, CompletionResult, stop_reason_from_finish};
use crate::error::{GatewayError, Result};

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct NimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NimClient {
    /// Create a new client for the given base URL (e.g., "https://integrate.api.nvidia.com/v1").
    ///
    /// `timeout` bounds every request sent through this client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = nim_acp_common::create_client_with_timeout(timeout)
            .map_err(GatewayError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send one chat completion request and return the decoded body.
    async fn chat_completion(
        &self,
        request: &ChatRequest<'_>,
        credential: &str,
        timeout: Duration,
    ) -> Result<ChatResponse> {
        let response = self
            .client
            .post(self.completions_url())
            .header(AUTHORIZATION, format!("Bearer {credential}"))
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON body: {e}")))
    }
}

/// Pull the first choice out of a decoded response.
fn first_choice(response: ChatResponse) -> Result<CompletionResult> {
    let choice = response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or_else(|| GatewayError::MalformedResponse("response has no choices".to_string()))?;

    let message = choice.message.ok_or_else(|| {
        GatewayError::MalformedResponse("first choice has no message".to_string())
    })?;

    let text = message.content.ok_or_else(|| {
        GatewayError::MalformedResponse("first choice message has no content".to_string())
    })?;

    let reasoning = message
        .reasoning_content
        .filter(|r| !r.is_empty())
        .or(message.reasoning.filter(|r| !r.is_empty()));

    Ok(CompletionResult {
        text,
        reasoning,
        stop_reason: stop_reason_from_finish(choice.finish_reason.as_deref()),
    })
}

#[async_trait]
impl CompletionGateway for NimClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        credential: &str,
        timeout: Duration,
    ) -> Result<CompletionResult> {
        let request = ChatRequest::new(model, messages);
        debug!(model, messages = messages.len(), "Sending chat completion");

        let response = self.chat_completion(&request, credential, timeout).await?;
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                total_tokens = ?usage.total_tokens,
                "Chat completion usage"
            );
        }
        first_choice(response)
    }
}
