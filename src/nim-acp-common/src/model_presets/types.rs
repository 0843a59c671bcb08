//! Type definitions for model presets.

/// Model alias entry mapping a short name to a full model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelAlias {
    /// Short alias (e.g., "kimi").
    pub alias: &'static str,
    /// Full upstream model identifier (e.g., "moonshotai/kimi-k2.5").
    pub model: &'static str,
}
