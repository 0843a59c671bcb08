//! Model presets for the NVIDIA NIM catalog.
//!
//! This module provides:
//! - Short preset names for commonly used upstream models
//! - Default model and endpoint constants

mod aliases;
mod constants;
mod types;

pub use types::ModelAlias;

pub use constants::{DEFAULT_BASE_URL, DEFAULT_MODEL, PROVIDER_NAME};

pub use aliases::{MODEL_ALIASES, list_model_aliases, lookup_model_alias, resolve_model_alias};
