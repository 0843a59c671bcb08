//! Centralized timeout constants.

/// Default timeout for a single prompt round-trip to the upstream model in seconds (5 minutes).
///
/// Large reasoning models routinely take minutes to produce a non-streamed reply.
pub const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 300;

/// Default timeout for establishing the upstream TCP/TLS connection in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
