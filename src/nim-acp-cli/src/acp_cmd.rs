//! ACP (Agent Client Protocol) server command.
//!
//! Resolves the bridge configuration from the environment and the command
//! line, then serves ACP on stdio until the host ends the session.

use std::time::Duration;

use anyhow::Result;
use nim_acp_engine::acp::AcpServer;
use nim_acp_engine::config::{API_KEY_ENV, resolve_preset};
use nim_acp_engine::{Config, ConfigError};
use tracing::{info, warn};

use crate::cli::Cli;

/// Build the configuration from a key/value source plus CLI overrides.
///
/// Model precedence: `--model`, then the positional preset, then
/// `NVIDIA_MODEL`, then the default.
pub fn build_config<F>(cli: &Cli, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::from_lookup(lookup);

    if let Some(preset) = cli.preset.as_deref() {
        config.model = resolve_preset(preset)?.to_string();
    }
    if let Some(model) = cli.model.as_deref() {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url.as_deref() {
        if base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base-url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        config = config.with_base_url(base_url.trim());
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        config = config.with_request_timeout(Duration::from_secs(secs));
    }

    Ok(config)
}

/// Run the ACP server on stdio.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli, |key| std::env::var(key).ok())?;

    if !config.has_api_key() {
        warn!(
            "{} is not set; prompts will be rejected until it is configured",
            API_KEY_ENV
        );
    }
    info!(
        model = %config.model,
        base_url = %config.base_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting nim-acp"
    );

    let mut server = AcpServer::with_nim_client(&config)?;
    server.run_stdio().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use nim_acp_common::{DEFAULT_BASE_URL, DEFAULT_MODEL};
    use nim_acp_engine::config::{BASE_URL_ENV, MODEL_ENV};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["nim-acp"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("should parse")
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = build_config(&cli(&[]), env(&[])).expect("config");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_preset_overrides_environment_model() {
        let config = build_config(
            &cli(&["deepseek"]),
            env(&[(MODEL_ENV, "meta/llama-3.3-70b-instruct")]),
        )
        .expect("config");
        assert_eq!(config.model, "deepseek-ai/deepseek-v3.2");
    }

    #[test]
    fn test_model_flag_overrides_preset() {
        let config = build_config(&cli(&["deepseek", "--model", "qwen"]), env(&[]))
            .expect("config");
        assert_eq!(config.model, "qwen/qwen3-coder-plus");

        let config = build_config(&cli(&["kimi", "-m", "vendor/custom-model"]), env(&[]))
            .expect("config");
        assert_eq!(config.model, "vendor/custom-model");
    }

    #[test]
    fn test_unknown_preset_lists_available() {
        let err = build_config(&cli(&["gpt4"]), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset { .. }));
        let message = err.to_string();
        assert!(message.contains("gpt4"));
        assert!(message.contains("kimi"));
        assert!(message.contains("coder"));
    }

    #[test]
    fn test_base_url_flag_overrides_environment() {
        let config = build_config(
            &cli(&["--base-url", "http://127.0.0.1:8000/v1"]),
            env(&[(BASE_URL_ENV, "http://elsewhere/v1")]),
        )
        .expect("config");
        assert_eq!(config.base_url, "http://127.0.0.1:8000/v1");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let err = build_config(&cli(&["--base-url", " "]), env(&[])).unwrap_err();
        assert!(err.to_string().contains("base-url"));
    }

    #[test]
    fn test_timeout_flag() {
        let config = build_config(&cli(&["--timeout", "45"]), env(&[])).expect("config");
        assert_eq!(config.request_timeout, Duration::from_secs(45));

        let err = build_config(&cli(&["--timeout", "0"]), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_credential_from_environment() {
        let config =
            build_config(&cli(&[]), env(&[(API_KEY_ENV, "nvapi-abc")])).expect("config");
        assert_eq!(config.api_key.as_deref(), Some("nvapi-abc"));
    }
}
