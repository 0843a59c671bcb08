//! CLI argument structures and parsing.
//!
//! Defines the command-line surface of the `nim-acp` binary using clap.

use clap::Parser;
use std::path::PathBuf;

/// Default file written by `--debug` when no path is given.
pub const DEFAULT_DEBUG_LOG: &str = "nim-acp-debug.log";

/// Environment variable consulted for the log level.
pub const LOG_LEVEL_ENV: &str = "NIM_ACP_LOG_LEVEL";

/// Log verbosity level for stderr output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// nim-acp - ACP bridge to NVIDIA NIM
///
/// Speaks the Agent Client Protocol on stdin/stdout and forwards prompts to
/// an NVIDIA NIM chat-completions endpoint.
#[derive(Debug, Parser)]
#[command(name = "nim-acp")]
#[command(author, version)]
#[command(about = "ACP bridge to NVIDIA NIM hosted models", long_about = None)]
pub struct Cli {
    /// Model preset to launch with (kimi, deepseek, glm, mimo, qwen, r1, coder)
    #[arg(value_name = "PRESET")]
    pub preset: Option<String>,

    /// Upstream model id or preset name; overrides PRESET and NVIDIA_MODEL
    #[arg(long = "model", short = 'm', value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the chat-completions API; overrides NVIDIA_BASE_URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Timeout for one prompt round-trip, in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// List the model presets and exit
    #[arg(long = "list-models")]
    pub list_models: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        short = 'L',
        value_enum,
        default_value = "info",
        help_heading = "Debugging"
    )]
    pub log_level: LogLevel,

    /// Enable debug logging (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', help_heading = "Debugging")]
    pub verbose: bool,

    /// Write ALL trace-level logs to FILE instead of stderr
    #[arg(
        long = "debug",
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_DEBUG_LOG,
        help_heading = "Debugging"
    )]
    pub debug: Option<PathBuf>,
}

impl Cli {
    /// Effective stderr log level.
    ///
    /// `--verbose` wins, then a parseable `NIM_ACP_LOG_LEVEL`, then `--log-level`.
    pub fn effective_log_level(&self, env_level: Option<&str>) -> LogLevel {
        if self.verbose {
            return LogLevel::Debug;
        }
        env_level
            .and_then(LogLevel::from_str_loose)
            .unwrap_or(self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==========================================================================
    // LogLevel tests
    // ==========================================================================

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_as_filter_str() {
        assert_eq!(LogLevel::Error.as_filter_str(), "error");
        assert_eq!(LogLevel::Warn.as_filter_str(), "warn");
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
        assert_eq!(LogLevel::Trace.as_filter_str(), "trace");
    }

    #[test]
    fn test_log_level_from_str_loose() {
        assert_eq!(LogLevel::from_str_loose("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str_loose(" trace "), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str_loose("verbose"), None);
        assert_eq!(LogLevel::from_str_loose(""), None);
    }

    // ==========================================================================
    // Cli parsing tests
    // ==========================================================================

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["nim-acp"]).expect("should parse with no args");

        assert!(cli.preset.is_none());
        assert!(cli.model.is_none());
        assert!(cli.base_url.is_none());
        assert!(cli.timeout.is_none());
        assert!(!cli.list_models);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(!cli.verbose);
        assert!(cli.debug.is_none());
    }

    #[test]
    fn test_cli_positional_preset() {
        let cli = Cli::try_parse_from(["nim-acp", "deepseek"]).expect("should parse");
        assert_eq!(cli.preset.as_deref(), Some("deepseek"));
    }

    #[test]
    fn test_cli_model_options() {
        let cli = Cli::try_parse_from(["nim-acp", "-m", "meta/llama-3.3-70b-instruct"])
            .expect("should parse");
        assert_eq!(cli.model.as_deref(), Some("meta/llama-3.3-70b-instruct"));

        let cli = Cli::try_parse_from(["nim-acp", "--model", "glm"]).expect("should parse");
        assert_eq!(cli.model.as_deref(), Some("glm"));
    }

    #[test]
    fn test_cli_base_url_and_timeout() {
        let cli = Cli::try_parse_from([
            "nim-acp",
            "--base-url",
            "http://localhost:8000/v1",
            "--timeout",
            "30",
        ])
        .expect("should parse");
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000/v1"));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn test_cli_invalid_timeout() {
        assert!(Cli::try_parse_from(["nim-acp", "--timeout", "soon"]).is_err());
        assert!(Cli::try_parse_from(["nim-acp", "--timeout", "-5"]).is_err());
    }

    #[test]
    fn test_cli_debug_without_value_uses_default_file() {
        let cli = Cli::try_parse_from(["nim-acp", "--debug"]).expect("should parse");
        assert_eq!(cli.debug, Some(PathBuf::from(DEFAULT_DEBUG_LOG)));
    }

    #[test]
    fn test_cli_debug_with_file() {
        let cli = Cli::try_parse_from(["nim-acp", "--debug=/tmp/bridge.log"]).expect("should parse");
        assert_eq!(cli.debug, Some(PathBuf::from("/tmp/bridge.log")));
    }

    #[test]
    fn test_cli_debug_does_not_swallow_preset() {
        let cli = Cli::try_parse_from(["nim-acp", "--debug", "kimi"]).expect("should parse");
        assert_eq!(cli.debug, Some(PathBuf::from(DEFAULT_DEBUG_LOG)));
        assert_eq!(cli.preset.as_deref(), Some("kimi"));
    }

    #[test]
    fn test_cli_list_models_flag() {
        let cli = Cli::try_parse_from(["nim-acp", "--list-models"]).expect("should parse");
        assert!(cli.list_models);
    }

    #[test]
    fn test_cli_unknown_option() {
        assert!(Cli::try_parse_from(["nim-acp", "--port", "8080"]).is_err());
    }

    #[test]
    fn test_cli_invalid_log_level() {
        assert!(Cli::try_parse_from(["nim-acp", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_effective_log_level_precedence() {
        let cli = Cli::try_parse_from(["nim-acp", "--log-level", "warn"]).expect("should parse");
        assert_eq!(cli.effective_log_level(None), LogLevel::Warn);
        assert_eq!(cli.effective_log_level(Some("trace")), LogLevel::Trace);
        assert_eq!(cli.effective_log_level(Some("nonsense")), LogLevel::Warn);

        let cli = Cli::try_parse_from(["nim-acp", "-v", "-L", "error"]).expect("should parse");
        assert_eq!(cli.effective_log_level(Some("trace")), LogLevel::Debug);
    }
}
