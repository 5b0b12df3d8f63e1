//! # Listener Configuration
//!
//! Read once from the environment at startup and never mutated.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SNL_RPC_WS_URL` | required |
//! | `SNL_CONTRACT_ADDRESS` | required |
//! | `SNL_CONFIRMATION_BLOCKS` | `12` |
//! | `SNL_CONFIRMATION_SLEEP_SECONDS` | `15` |
//! | `SNL_SUBSCRIPTION_BUFFER` | `256` |
//! | `SNL_API_HOST` | `http://localhost` |
//! | `SNL_API_PORT` | `8080` |
//! | `SNL_API_TIMEOUT_SECONDS` | `10` |
//! | `SNL_KEEPALIVE_SECONDS` | `30` (`0` disables) |

use std::str::FromStr;
use std::time::Duration;

use primitive_types::H160;
use shared_types::parse_address;
use snl_03_confirmation_pipeline::PipelineConfig;
use thiserror::Error;

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but unusable.
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Downstream Star Notary API settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host, with or without scheme.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// `scheme://host:port` without a trailing slash.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }
}

/// Complete listener configuration.
#[derive(Clone, Debug)]
pub struct ListenerConfig {
    /// Ledger websocket endpoint.
    pub rpc_ws_url: String,
    /// Star Notary contract address.
    pub contract_address: H160,
    /// Confirmation depth in blocks.
    pub confirmation_blocks: u64,
    /// Delay between reconciliation scans.
    pub poll_interval: Duration,
    /// Capacity of each live subscription channel.
    pub subscription_buffer: usize,
    /// Downstream API.
    pub api: ApiConfig,
    /// Provider keepalive period; `None` disables the keepalive task.
    pub keepalive_interval: Option<Duration>,
}

impl ListenerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_ws_url = lookup("SNL_RPC_WS_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SNL_RPC_WS_URL"))?;

        let contract_raw = lookup("SNL_CONTRACT_ADDRESS")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SNL_CONTRACT_ADDRESS"))?;
        let contract_address =
            parse_address(&contract_raw).map_err(|e| ConfigError::Invalid {
                key: "SNL_CONTRACT_ADDRESS",
                reason: e.to_string(),
            })?;

        let confirmation_blocks = parse_or(&lookup, "SNL_CONFIRMATION_BLOCKS", 12u64)?;
        let poll_secs = parse_or(&lookup, "SNL_CONFIRMATION_SLEEP_SECONDS", 15u64)?;
        let subscription_buffer = parse_or(&lookup, "SNL_SUBSCRIPTION_BUFFER", 256usize)?;
        let api_host =
            lookup("SNL_API_HOST").unwrap_or_else(|| "http://localhost".to_string());
        let api_port = parse_or(&lookup, "SNL_API_PORT", 8080u16)?;
        let api_timeout = parse_or(&lookup, "SNL_API_TIMEOUT_SECONDS", 10u64)?;
        let keepalive_secs = parse_or(&lookup, "SNL_KEEPALIVE_SECONDS", 30u64)?;

        let config = Self {
            rpc_ws_url: rpc_ws_url.trim().to_string(),
            contract_address,
            confirmation_blocks,
            poll_interval: Duration::from_secs(poll_secs),
            subscription_buffer,
            api: ApiConfig {
                host: api_host,
                port: api_port,
                timeout: Duration::from_secs(api_timeout),
            },
            keepalive_interval: (keepalive_secs > 0).then(|| Duration::from_secs(keepalive_secs)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the listener cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_ws_url.starts_with("ws://") || self.rpc_ws_url.starts_with("wss://")) {
            return Err(ConfigError::Invalid {
                key: "SNL_RPC_WS_URL",
                reason: "must be a ws:// or wss:// URL".to_string(),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                key: "SNL_CONFIRMATION_SLEEP_SECONDS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.subscription_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "SNL_SUBSCRIPTION_BUFFER",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.api.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "SNL_API_TIMEOUT_SECONDS",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Settings for the confirmation pipeline.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            contract_address: self.contract_address,
            confirmation_blocks: self.confirmation_blocks,
            poll_interval: self.poll_interval,
            subscription_buffer: self.subscription_buffer,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
