//! ACP request handlers.
//!
//! This module contains the protocol state machine: it maps each request to a
//! handler, tracks the session lifecycle and turns gateway results into
//! responses and notifications.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::acp::protocol::{
    AcpError, AcpMessage, AcpNotification, AcpRequest, AcpRequestId, AcpResponse, methods,
};
use crate::acp::session::SessionRegistry;
use crate::acp::types::*;
use crate::config::{API_KEY_ENV, Config};
use crate::error::GatewayError;
use crate::gateway::{CompletionGateway, CompletionResult};

/// Lifecycle of the connection as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Nothing received yet.
    Uninitialized,
    /// `initialize` answered, no session.
    Ready,
    /// A session is open and accepts prompts.
    SessionOpen,
    /// `session/end` answered; the loop must stop.
    Closed,
}

/// Whether the read loop keeps going after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Everything produced by one request, in write order.
#[derive(Debug)]
pub struct Dispatch {
    pub messages: Vec<AcpMessage>,
    pub control: LoopControl,
}

impl Dispatch {
    fn reply(response: AcpResponse) -> Self {
        Self {
            messages: vec![response.into()],
            control: LoopControl::Continue,
        }
    }

    fn stop(mut self) -> Self {
        self.control = LoopControl::Stop;
        self
    }

    /// The response carried by this dispatch.
    pub fn response(&self) -> Option<&AcpResponse> {
        self.messages.iter().find_map(|m| match m {
            AcpMessage::Response(r) => Some(r),
            AcpMessage::Notification(_) => None,
        })
    }
}

/// ACP request handler.
pub struct AcpHandler {
    registry: SessionRegistry,
    gateway: Arc<dyn CompletionGateway>,
    state: DispatchState,
    request_timeout: Duration,
}

impl AcpHandler {
    /// Create a new handler.
    pub fn new(config: &Config, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            registry: SessionRegistry::new(config.model.clone(), config.api_key.clone()),
            gateway,
            state: DispatchState::Uninitialized,
            request_timeout: config.request_timeout,
        }
    }

    /// Current dispatcher state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// The session registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, params: Value) -> InitializeResponse {
        match serde_json::from_value::<InitializeRequest>(params) {
            Ok(req) => debug!(
                protocol_version = ?req.protocol_version,
                client = req.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
                "Initialize request"
            ),
            Err(e) => debug!(error = %e, "Initialize request with unrecognized params"),
        }

        if self.state == DispatchState::Uninitialized {
            self.state = DispatchState::Ready;
        }
        InitializeResponse::descriptor()
    }

    /// Handle session/new request.
    fn handle_session_new(&mut self, params: Value) -> Result<NewSessionResponse, AcpError> {
        let req: NewSessionRequest = parse_params(params)?;
        if self.state == DispatchState::Uninitialized {
            debug!("session/new received before initialize");
        }

        let model = self.registry.model().to_string();
        let session = self.registry.open(model);
        self.state = DispatchState::SessionOpen;
        info!(
            session_id = %session.id,
            model = %session.model,
            cwd = req.cwd.as_deref().unwrap_or(""),
            "Session opened"
        );

        Ok(NewSessionResponse {
            session_id: session.id,
            models: Some(SessionModels {
                current_model_id: session.model,
                available_models: nim_acp_common::list_model_aliases()
                    .iter()
                    .map(|a| ModelInfo {
                        model_id: a.model.to_string(),
                        name: a.alias.to_string(),
                    })
                    .collect(),
            }),
        })
    }

    /// Handle session/prompt request.
    ///
    /// Returns the optional reasoning notification and the prompt response.
    async fn handle_session_prompt(
        &mut self,
        params: Value,
    ) -> Result<(Option<AcpNotification>, PromptResponse), AcpError> {
        if self.state != DispatchState::SessionOpen {
            warn!(state = ?self.state, "session/prompt without an open session");
            return Err(AcpError::no_active_session());
        }
        let session = self
            .registry
            .current()
            .cloned()
            .ok_or_else(|| AcpError::internal("open session missing from registry"))?;

        let req: PromptRequest = parse_params(params)?;
        if let Some(requested) = req.session_id.as_deref() {
            if requested != session.id {
                warn!(requested, open = %session.id, "session/prompt for unknown session");
                return Err(AcpError::session_not_found(requested));
            }
        }

        let Some(credential) = self.registry.credential().map(str::to_string) else {
            warn!("session/prompt rejected: {} is not set", API_KEY_ENV);
            return Err(AcpError::missing_credential(API_KEY_ENV));
        };

        let messages = prompt_to_messages(&req.prompt);
        if messages.is_empty() {
            debug!(
                blocks = req.prompt.len(),
                "Prompt has no text content; skipping upstream call"
            );
            let empty = CompletionResult::empty();
            return Ok((None, PromptResponse::new(empty.text, empty.stop_reason)));
        }

        debug!(
            session_id = %session.id,
            messages = messages.len(),
            "Forwarding prompt upstream"
        );
        let timeout = self.request_timeout;
        let outcome = tokio::time::timeout(
            timeout,
            self.gateway
                .complete(&messages, &session.model, &credential, timeout),
        )
        .await
        .unwrap_or(Err(GatewayError::Timeout(timeout)));

        match outcome {
            Ok(result) => {
                debug!(
                    stop_reason = ?result.stop_reason,
                    chars = result.text.len(),
                    "Upstream completion received"
                );
                let thought = result
                    .reasoning
                    .map(|text| thought_notification(&session.id, text));
                Ok((thought, PromptResponse::new(result.text, result.stop_reason)))
            }
            Err(e) if e.is_timeout() => {
                error!(timeout_secs = timeout.as_secs(), "Upstream request timed out");
                Err(AcpError::upstream_timeout(timeout))
            }
            Err(e) => {
                error!(error = %e, "Upstream request failed");
                Err(AcpError::upstream(e.to_string()))
            }
        }
    }

    /// Handle session/end request.
    fn handle_session_end(&mut self) -> EndSessionResponse {
        if self.state != DispatchState::SessionOpen {
            debug!(state = ?self.state, "session/end without an open session");
        }
        self.registry.close();
        self.state = DispatchState::Closed;
        EndSessionResponse::default()
    }

    /// Process one request and return what must be written for it.
    pub async fn process_request(&mut self, request: AcpRequest) -> Dispatch {
        let AcpRequest {
            id, method, params, ..
        } = request;
        let params = params.unwrap_or(Value::Null);
        debug!(method = %method, id = ?id, "Dispatching request");

        match method.as_str() {
            methods::INITIALIZE => {
                let resp = self.handle_initialize(params);
                Dispatch::reply(respond(id, Ok(resp)))
            }
            methods::SESSION_NEW => {
                let resp = self.handle_session_new(params);
                Dispatch::reply(respond(id, resp))
            }
            methods::SESSION_PROMPT => match self.handle_session_prompt(params).await {
                Ok((thought, resp)) => {
                    let mut messages: Vec<AcpMessage> = Vec::with_capacity(2);
                    if let Some(notification) = thought {
                        messages.push(notification.into());
                    }
                    messages.push(respond(id, Ok(resp)).into());
                    Dispatch {
                        messages,
                        control: LoopControl::Continue,
                    }
                }
                Err(e) => Dispatch::reply(AcpResponse::error(id, e)),
            },
            methods::SESSION_END => {
                let resp = self.handle_session_end();
                info!("Session end requested; stopping");
                Dispatch::reply(respond(id, Ok(resp))).stop()
            }
            _ => {
                warn!(method = %method, "Unknown method");
                Dispatch::reply(AcpResponse::error(id, AcpError::method_not_found(&method)))
            }
        }
    }
}

/// Decode request params; absent params decode to the type's default.
fn parse_params<T: DeserializeOwned + Default>(params: Value) -> Result<T, AcpError> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params).map_err(|e| AcpError::invalid_params(e.to_string()))
}

fn respond<T: Serialize>(id: Option<AcpRequestId>, result: Result<T, AcpError>) -> AcpResponse {
    match result.and_then(|v| {
        serde_json::to_value(v).map_err(|e| AcpError::internal(e.to_string()))
    }) {
        Ok(value) => AcpResponse::success(id, value),
        Err(e) => AcpResponse::error(id, e),
    }
}

fn thought_notification(session_id: &str, text: String) -> AcpNotification {
    let notification = SessionNotification {
        session_id: session_id.to_string(),
        update: SessionUpdate::AgentThoughtChunk {
            content: MessageContent::Text { text },
        },
    };
    AcpNotification::new(methods::SESSION_UPDATE)
        .with_params(serde_json::to_value(notification).unwrap_or(Value::Null))
}
