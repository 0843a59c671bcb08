//! Command execution handlers.

use std::io::Write;

use anyhow::Result;
use nim_acp_common::{DEFAULT_MODEL, PROVIDER_NAME, list_model_aliases};

use super::args::Cli;
use crate::acp_cmd;

/// Dispatch the parsed command line.
pub async fn dispatch_command(cli: Cli) -> Result<()> {
    if cli.list_models {
        let mut stderr = std::io::stderr().lock();
        write_model_list(&mut stderr)?;
        return Ok(());
    }

    acp_cmd::run(&cli).await
}

/// Write the preset table.
///
/// The binary writes this to stderr because stdout is reserved for protocol
/// traffic.
pub fn write_model_list<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Model presets ({PROVIDER_NAME}):")?;
    let width = list_model_aliases()
        .iter()
        .map(|a| a.alias.len())
        .max()
        .unwrap_or(0);
    for alias in list_model_aliases() {
        let marker = if alias.model == DEFAULT_MODEL {
            " (default)"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<width$}  {}{}",
            alias.alias,
            alias.model,
            marker,
            width = width
        )?;
    }
    Ok(())
}
