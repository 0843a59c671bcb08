//! nim-acp - Main entry point.
//!
//! Stdout carries ACP traffic only; every log line goes to stderr, or to a
//! file when `--debug` is given.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use nim_acp_cli::cli::{Cli, LOG_LEVEL_ENV, LogLevel, dispatch_command};

/// Guard that ensures debug log file is properly flushed when dropped.
struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up debug file logging that writes ALL trace-level logs to `path`.
fn setup_debug_file_logging(path: &Path) -> Result<DebugLogGuard> {
    use std::fs::File;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let file = File::create(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create {}: {}. Check write permissions.",
            path.display(),
            e
        )
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(EnvFilter::new("trace"))
        .with(file_layer)
        .init();

    eprintln!("Debug mode enabled: logging to {}", path.display());

    Ok(DebugLogGuard { _guard: guard })
}

/// Set up stderr logging at the effective level.
fn setup_stderr_logging(log_level: LogLevel) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str()))
    } else {
        EnvFilter::new(format!(
            "warn,nim_acp_cli={0},nim_acp_engine={0},nim_acp_common={0}",
            log_level.as_filter_str()
        ))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Existing environment variables take precedence over .env entries.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let _debug_guard = match &cli.debug {
        Some(path) => Some(setup_debug_file_logging(path)?),
        None => {
            let env_level = std::env::var(LOG_LEVEL_ENV).ok();
            setup_stderr_logging(cli.effective_log_level(env_level.as_deref()));
            None
        }
    };

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to load .env"),
    }

    dispatch_command(cli).await
}
