//! HTTP client factory for upstream requests.
//!
//! All clients include: User-Agent, connect timeout, tcp_nodelay and a bounded
//! idle pool so DNS is re-resolved periodically.

use reqwest::Client;
use std::time::Duration;

use crate::timeout::DEFAULT_CONNECT_TIMEOUT_SECS;

/// User-Agent string for all HTTP requests
pub const USER_AGENT: &str = concat!("nim-acp/", env!("CARGO_PKG_VERSION"));

/// Timeout for establishing a connection to the upstream.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS);

/// Connection pool idle timeout.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Creates an HTTP client builder with standard configuration.
///
/// Use this when you need to customize the client further before building.
pub fn create_client_builder() -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .tcp_nodelay(true)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(2)
}

/// Creates an HTTP client with a custom overall request timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client, String> {
    create_client_builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {e}"))
}
