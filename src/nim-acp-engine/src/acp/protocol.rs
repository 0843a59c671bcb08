//! ACP Protocol types and JSON-RPC framing.
//!
//! This module provides the JSON-RPC envelope for the ACP protocol,
//! including request/response types and error constructors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request for ACP.
///
/// Hosts are not strict about the envelope: `jsonrpc` may be missing and
/// `id` may be absent or `null`. Such requests are still answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcpRequest {
    /// JSON-RPC version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    /// Request ID.
    #[serde(default)]
    pub id: Option<AcpRequestId>,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl AcpRequest {
    /// Create a new request.
    pub fn new(id: impl Into<AcpRequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some("2.0".to_string()),
            id: Some(id.into()),
            method: method.into(),
            params: None,
        }
    }

    /// Set parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// JSON-RPC response for ACP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcpResponse {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Request ID, `null` when the request carried none.
    pub id: Option<AcpRequestId>,
    /// Result (success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AcpError>,
}

impl AcpResponse {
    /// Create a success response.
    pub fn success(id: Option<AcpRequestId>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<AcpRequestId>, error: AcpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Whether this is an error response.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// JSON-RPC notification for ACP (no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcpNotification {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl AcpNotification {
    /// Create a new notification.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: None,
        }
    }

    /// Set parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// Anything the server writes to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AcpMessage {
    Response(AcpResponse),
    Notification(AcpNotification),
}

impl From<AcpResponse> for AcpMessage {
    fn from(response: AcpResponse) -> Self {
        Self::Response(response)
    }
}

impl From<AcpNotification> for AcpMessage {
    fn from(notification: AcpNotification) -> Self {
        Self::Notification(notification)
    }
}

/// Request ID: any JSON scalar, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcpRequestId {
    /// Numeric ID (integer, unsigned or float).
    Number(serde_json::Number),
    /// String ID.
    String(String),
    /// Boolean ID.
    Bool(bool),
}

impl From<i64> for AcpRequestId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<String> for AcpRequestId {
    fn from(id: String) -> Self {
        Self::String(id)
    }
}

impl From<&str> for AcpRequestId {
    fn from(id: &str) -> Self {
        Self::String(id.to_string())
    }
}

/// JSON-RPC error for ACP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcpError {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
    /// Additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AcpError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self::new(codes::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Invalid params (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMS, message)
    }

    /// Internal error (-32603).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL_ERROR, message)
    }

    /// Upstream failure other than a timeout (-32000).
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(codes::UPSTREAM_ERROR, message)
    }

    /// No session has been opened yet (-32001).
    pub fn no_active_session() -> Self {
        Self::new(
            codes::SESSION_NOT_FOUND,
            "No active session; call session/new first",
        )
    }

    /// The request names a session other than the open one (-32001).
    pub fn session_not_found(session_id: &str) -> Self {
        Self::new(
            codes::SESSION_NOT_FOUND,
            format!("Session not found: {session_id}"),
        )
    }

    /// Credential missing from the configuration (-32003).
    pub fn missing_credential(variable: &str) -> Self {
        Self::new(
            codes::CONFIGURATION_ERROR,
            format!("{variable} is not set; cannot call the upstream model"),
        )
    }

    /// Upstream call exceeded its deadline (-32004).
    pub fn upstream_timeout(timeout: Duration) -> Self {
        Self::new(
            codes::UPSTREAM_TIMEOUT,
            format!("Upstream request timed out after {}s", timeout.as_secs()),
        )
    }
}

/// JSON-RPC error codes used by the bridge.
pub mod codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const UPSTREAM_ERROR: i32 = -32000;
    pub const SESSION_NOT_FOUND: i32 = -32001;
    pub const CONFIGURATION_ERROR: i32 = -32003;
    pub const UPSTREAM_TIMEOUT: i32 = -32004;
}

/// ACP method names.
pub mod methods {
    /// Initialize the connection.
    pub const INITIALIZE: &str = "initialize";
    /// Create a new session.
    pub const SESSION_NEW: &str = "session/new";
    /// Send a prompt to a session.
    pub const SESSION_PROMPT: &str = "session/prompt";
    /// End the session and stop the server.
    pub const SESSION_END: &str = "session/end";
    /// Session update notification.
    pub const SESSION_UPDATE: &str = "session/update";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_without_id_or_version() {
        let req: AcpRequest =
            serde_json::from_value(json!({"method": "initialize"})).expect("parse");
        assert!(req.id.is_none());
        assert!(req.jsonrpc.is_none());
        assert!(req.params.is_none());
    }

    #[test]
    fn test_request_null_and_scalar_ids() {
        let req: AcpRequest =
            serde_json::from_value(json!({"id": null, "method": "x"})).expect("parse");
        assert!(req.id.is_none());

        let req: AcpRequest =
            serde_json::from_value(json!({"id": 7, "method": "x"})).expect("parse");
        assert_eq!(req.id, Some(AcpRequestId::from(7)));

        let req: AcpRequest =
            serde_json::from_value(json!({"id": "abc", "method": "x"})).expect("parse");
        assert_eq!(req.id, Some(AcpRequestId::String("abc".to_string())));
    }

    #[test]
    fn test_any_scalar_id_is_echoed_verbatim() {
        let ids = [
            json!(1.5),
            json!(true),
            json!(false),
            json!(18446744073709551615u64),
            json!(-9223372036854775808i64),
            json!(0),
            json!(""),
        ];
        for id in ids {
            let req: AcpRequest = serde_json::from_value(json!({"id": id, "method": "x"}))
                .unwrap_or_else(|e| panic!("id {id} rejected: {e}"));
            let resp = AcpResponse::success(req.id, json!({}));
            assert_eq!(serde_json::to_value(&resp).unwrap()["id"], id);
        }
    }

    #[test]
    fn test_non_scalar_id_is_rejected() {
        for id in [json!({"nested": true}), json!([1])] {
            let result = serde_json::from_value::<AcpRequest>(json!({"id": id, "method": "x"}));
            assert!(result.is_err(), "id {id} accepted");
        }
    }

    #[test]
    fn test_request_missing_method_is_rejected() {
        let result = serde_json::from_value::<AcpRequest>(json!({"id": 1, "params": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_success_response_shape() {
        let resp = AcpResponse::success(Some(1.into()), json!({"ok": true}));
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "result": {"ok": true}})
        );
    }

    #[test]
    fn test_error_response_echoes_null_id() {
        let resp = AcpResponse::error(None, AcpError::method_not_found("foo/bar"));
        assert!(resp.is_error());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32601, "message": "Method not found: foo/bar"}
            })
        );
    }

    #[test]
    fn test_message_serializes_untagged() {
        let notification: AcpMessage = AcpNotification::new(methods::SESSION_UPDATE)
            .with_params(json!({"sessionId": "s"}))
            .into();
        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"jsonrpc": "2.0", "method": "session/update", "params": {"sessionId": "s"}})
        );
    }

    #[test]
    fn test_timeout_error_mentions_timeout() {
        let err = AcpError::upstream_timeout(Duration::from_secs(300));
        assert_eq!(err.code, codes::UPSTREAM_TIMEOUT);
        assert!(err.message.contains("timed out"));
        assert_ne!(err.code, AcpError::upstream("boom").code);
    }
}
