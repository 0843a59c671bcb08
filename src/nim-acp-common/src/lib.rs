//! Common utilities shared across nim-acp crates.

pub mod http_client;
pub mod model_presets;
pub mod timeout;

pub use http_client::{
    CONNECT_TIMEOUT, POOL_IDLE_TIMEOUT, USER_AGENT, create_client_builder,
    create_client_with_timeout,
};
pub use model_presets::*;
pub use timeout::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PROMPT_TIMEOUT_SECS};
