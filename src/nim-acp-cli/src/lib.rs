//! nim-acp CLI library module.
//!
//! - `cli/` - CLI argument parsing and command dispatch
//! - `acp_cmd` - Configuration resolution and the stdio ACP server

pub mod acp_cmd;
pub mod cli;
