use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::gateway::ChatMessage;

/// ACP Protocol Version.
pub const PROTOCOL_VERSION: i32 = 1;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "nim-acp";

/// ACP Initialize Request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    #[serde(default)]
    pub protocol_version: Option<i32>,
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
    #[serde(default)]
    pub client_capabilities: Option<Value>,
}

/// ACP Initialize Response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    pub protocol_version: i32,
    pub agent_capabilities: AgentCapabilities,
    pub server_info: ServerInfo,
    #[serde(default)]
    pub auth_methods: Vec<Value>,
}

impl InitializeResponse {
    /// The fixed descriptor this server answers every `initialize` with.
    pub fn descriptor() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            agent_capabilities: AgentCapabilities {
                load_session: false,
                prompt_capabilities: PromptCapabilities {
                    image: false,
                    audio: false,
                    embedded_context: true,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            auth_methods: vec![],
        }
    }
}

/// Agent Capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub load_session: bool,
    pub prompt_capabilities: PromptCapabilities,
}

/// Prompt Capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptCapabilities {
    pub image: bool,
    pub audio: bool,
    pub embedded_context: bool,
}

/// Client Info.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Server Info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// New Session Request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRequest {
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub mcp_servers: Vec<Value>,
}

/// New Session Response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<SessionModels>,
}

/// Session Models.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionModels {
    pub current_model_id: String,
    pub available_models: Vec<ModelInfo>,
}

/// Model Info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model_id: String,
    pub name: String,
}

/// Prompt Request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub prompt: Vec<PromptContent>,
}

/// Blocks that fail to decode become [`PromptContent::Unknown`] instead of
/// failing the whole request.
fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<PromptContent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|block| serde_json::from_value(block).unwrap_or(PromptContent::Unknown))
        .collect())
}

/// Prompt Content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PromptContent {
    Text {
        #[serde(default)]
        text: String,
    },
    Image {
        #[serde(default)]
        mime_type: Option<String>,
        #[serde(default)]
        uri: Option<String>,
    },
    Audio {
        #[serde(default)]
        mime_type: Option<String>,
    },
    Resource {
        #[serde(default)]
        resource: EmbeddedResource,
    },
    ResourceLink {
        #[serde(default)]
        uri: String,
        #[serde(default)]
        name: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Contents of an embedded resource block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedResource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub blob: Option<String>,
}

impl PromptContent {
    /// Map one block to at most one upstream message.
    ///
    /// Text blocks pass through, embedded text resources are kept behind a
    /// `[resource: <uri>]` marker line, everything else is dropped.
    pub fn to_message(&self) -> Option<ChatMessage> {
        match self {
            Self::Text { text } => Some(ChatMessage::user(text.clone())),
            Self::Resource { resource } => match &resource.text {
                Some(text) => {
                    let uri = resource.uri.as_deref().unwrap_or("embedded");
                    Some(ChatMessage::user(format!("[resource: {uri}]\n{text}")))
                }
                None => {
                    debug!(uri = ?resource.uri, "Dropping binary resource block");
                    None
                }
            },
            Self::Image { .. } | Self::Audio { .. } | Self::ResourceLink { .. } | Self::Unknown => {
                debug!(kind = self.kind(), "Dropping non-text prompt block");
                None
            }
        }
    }

    /// Wire name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Audio { .. } => "audio",
            Self::Resource { .. } => "resource",
            Self::ResourceLink { .. } => "resource_link",
            Self::Unknown => "unknown",
        }
    }
}

/// Flatten prompt blocks into the upstream message list.
pub fn prompt_to_messages(blocks: &[PromptContent]) -> Vec<ChatMessage> {
    blocks.iter().filter_map(PromptContent::to_message).collect()
}

/// Prompt Response.
///
/// The completion text is delivered inline rather than through
/// `session/update` chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub stop_reason: StopReason,
    pub completion: Completion,
}

impl PromptResponse {
    pub fn new(text: impl Into<String>, stop_reason: StopReason) -> Self {
        Self {
            stop_reason,
            completion: Completion {
                content: vec![MessageContent::Text { text: text.into() }],
            },
        }
    }
}

/// Completion payload of a prompt response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub content: Vec<MessageContent>,
}

/// Stop Reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
}

/// End Session Response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndSessionResponse {}

/// Session Notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNotification {
    pub session_id: String,
    pub update: SessionUpdate,
}

/// Session Update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "sessionUpdate", rename_all = "snake_case")]
pub enum SessionUpdate {
    AgentThoughtChunk { content: MessageContent },
}

/// Message Content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text { text: String },
}
