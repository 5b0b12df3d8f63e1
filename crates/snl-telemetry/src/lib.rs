//! # SNL Telemetry
//!
//! Logging setup and metrics export for the Star Notary listener.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use snl_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SNL_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `SNL_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `SNL_SERVICE_NAME` | `star-notary-listener` | Service name in logs |
//! | `SNL_LOG_SOURCE` | `false` | Include file and line |
//! | `SNL_LOG_PATH` | unset | Also append plain-text logs to `<dir>/starnotary.log` |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::{TelemetryConfig, LOG_FILE_NAME};
pub use tracing_setup::{env_filter, file_layer, init_tracing, FileLayer};

use prometheus::{Encoder, TextEncoder};
use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    LogFile(String),

    /// Metrics could not be encoded.
    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),

    /// The configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)
}

/// Render every registered Prometheus metric in the text exposition format.
pub fn metrics_snapshot() -> Result<String, TelemetryError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
