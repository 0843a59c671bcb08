//! Session registry.
//!
//! Tracks the single session a bridge process may have open, together with
//! the model and credential resolved at startup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// An open conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session ID handed to the host.
    pub id: String,
    /// Upstream model used for this session's prompts.
    pub model: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Holds at most one [`Session`].
#[derive(Debug)]
pub struct SessionRegistry {
    current: Option<Session>,
    model: String,
    credential: Option<String>,
}

impl SessionRegistry {
    /// Create an empty registry with the resolved model and credential.
    pub fn new(model: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            current: None,
            model: model.into(),
            credential: credential.filter(|c| !c.is_empty()),
        }
    }

    /// The open session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Open a session, replacing any previous one.
    pub fn open(&mut self, model: impl Into<String>) -> Session {
        let session = Session {
            id: format!("sess_{}", uuid::Uuid::new_v4().simple()),
            model: model.into(),
            created_at: Utc::now(),
        };
        if let Some(previous) = self.current.replace(session.clone()) {
            info!(previous = %previous.id, "Replacing open session");
        }
        session
    }

    /// Close the open session, if any.
    pub fn close(&mut self) {
        if let Some(session) = self.current.take() {
            info!(session_id = %session.id, "Session closed");
        }
    }

    /// Configured upstream model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configured credential.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}
