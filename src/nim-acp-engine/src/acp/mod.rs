//! ACP (Agent Client Protocol) module.
//!
//! This module implements the ACP protocol for editor integration,
//! letting a host editor drive an NVIDIA NIM hosted model.
//!
//! ## Protocol Overview
//!
//! ACP uses JSON-RPC 2.0 framed as one JSON object per line over stdio:
//! - `initialize` - Return the fixed capability descriptor
//! - `session/new` - Open the single conversation session
//! - `session/prompt` - Forward a prompt upstream and return the completion
//! - `session/end` - Close the session and stop the server
//!
//! ## Delivery
//!
//! Completion text is returned inline in the `session/prompt` response.
//! Reasoning traces, when the model exposes one, are sent first as a
//! `session/update` notification.

pub mod handler;
pub mod protocol;
pub mod server;
pub mod session;
pub mod transport;
pub mod types;

pub use handler::{AcpHandler, Dispatch, DispatchState, LoopControl};
pub use protocol::{
    AcpError, AcpMessage, AcpNotification, AcpRequest, AcpRequestId, AcpResponse,
};
pub use server::AcpServer;
pub use session::{Session, SessionRegistry};
pub use transport::LineTransport;
pub use types::*;
