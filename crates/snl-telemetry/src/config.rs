//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Name of the log file written under [`TelemetryConfig::log_path`].
pub const LOG_FILE_NAME: &str = "starnotary.log";

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to include file and line in log lines
    pub with_source_location: bool,

    /// Directory for a plain-text copy of the log; `None` logs to the
    /// console only
    pub log_path: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "star-notary-listener".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_source_location: false,
            log_path: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SNL_SERVICE_NAME`: Service name (default: star-notary-listener)
    /// - `SNL_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SNL_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `SNL_LOG_SOURCE`: Include file and line (default: false)
    /// - `SNL_LOG_PATH`: Directory for `starnotary.log` (default: unset)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("SNL_SERVICE_NAME")
                .unwrap_or_else(|_| "star-notary-listener".to_string()),

            log_level: env::var("SNL_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("SNL_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            with_source_location: env::var("SNL_LOG_SOURCE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            log_path: env::var("SNL_LOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
