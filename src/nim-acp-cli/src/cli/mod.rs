//! CLI argument parsing and command dispatch.
//!
//! # Module Structure
//!
//! - `args` - Command-line argument structures
//! - `handlers` - Command execution handlers

pub mod args;
pub mod handlers;

pub use args::{Cli, DEFAULT_DEBUG_LOG, LOG_LEVEL_ENV, LogLevel};
pub use handlers::{dispatch_command, write_model_list};
