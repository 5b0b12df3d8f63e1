//! Tracing subscriber setup.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter`, either a JSON
//! or a human-readable console layer, and an optional plain-text file layer.

use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LOG_FILE_NAME;
use crate::{TelemetryConfig, TelemetryError};

/// Plain-text layer writing to the log file.
pub type FileLayer<S> = fmt::Layer<S, format::DefaultFields, format::Format, Mutex<File>>;

/// Build the level filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Open `<log_path>/starnotary.log` for appending, creating the directory.
///
/// `None` when no log path is configured.
pub fn file_layer<S>(config: &TelemetryConfig) -> Result<Option<FileLayer<S>>, TelemetryError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let Some(dir) = &config.log_path else {
        return Ok(None);
    };
    fs::create_dir_all(dir)
        .map_err(|e| TelemetryError::LogFile(format!("{}: {}", dir.display(), e)))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| TelemetryError::LogFile(format!("{}: {}", path.display(), e)))?;

    Ok(Some(
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .with_writer(Mutex::new(file)),
    ))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(file_layer(config)?)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .with_ansi(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(file_layer(config)?)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        log_path = ?config.log_path,
        "Tracing initialized"
    );
    Ok(())
}
