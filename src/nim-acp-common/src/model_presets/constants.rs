//! Default model and endpoint constants.

/// Default upstream model (must match the NIM catalog id).
pub const DEFAULT_MODEL: &str = "moonshotai/kimi-k2.5";

/// Default OpenAI-compatible base URL of the NIM API.
pub const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";

/// Provider name reported in logs.
pub const PROVIDER_NAME: &str = "nvidia-nim";
