//! Model alias definitions and resolution functions.

use super::types::ModelAlias;

/// Built-in presets, one short name per upstream model.
pub const MODEL_ALIASES: &[ModelAlias] = &[
    ModelAlias {
        alias: "kimi",
        model: "moonshotai/kimi-k2.5",
    },
    ModelAlias {
        alias: "deepseek",
        model: "deepseek-ai/deepseek-v3.2",
    },
    ModelAlias {
        alias: "glm",
        model: "z-ai/glm-4-7",
    },
    ModelAlias {
        alias: "mimo",
        model: "xiaomi/mimo-v2-flash",
    },
    ModelAlias {
        alias: "qwen",
        model: "qwen/qwen3-coder-plus",
    },
    ModelAlias {
        alias: "r1",
        model: "deepseek-ai/deepseek-r1-distill-qwen-32b",
    },
    ModelAlias {
        alias: "coder",
        model: "deepseek-ai/deepseek-coder-6.7b-instruct",
    },
];

/// Looks up a preset by its short name (case-insensitive).
///
/// Returns `None` when the name is not a known preset.
pub fn lookup_model_alias(name: &str) -> Option<&'static str> {
    MODEL_ALIASES
        .iter()
        .find(|a| a.alias.eq_ignore_ascii_case(name.trim()))
        .map(|a| a.model)
}

/// Resolves a model alias to its full model identifier.
///
/// If the input matches a known alias, returns the corresponding full model name.
/// Otherwise, returns the input unchanged.
///
/// # Examples
///
/// ```
/// use nim_acp_common::resolve_model_alias;
///
/// assert_eq!(resolve_model_alias("kimi"), "moonshotai/kimi-k2.5");
/// assert_eq!(resolve_model_alias("meta/llama-3.3-70b-instruct"), "meta/llama-3.3-70b-instruct");
/// ```
pub fn resolve_model_alias(model: &str) -> &str {
    lookup_model_alias(model).unwrap_or(model)
}

/// Returns a list of all available model aliases.
pub fn list_model_aliases() -> &'static [ModelAlias] {
    MODEL_ALIASES
}
