//! # Listener Runtime Library
//!
//! Configuration and concrete adapters for the Star Notary listener. The
//! entry point is the `main.rs` binary; the library exists so the adapters
//! can be tested on their own.

#![warn(missing_docs)]

pub mod adapters;
pub mod config;
pub mod keepalive;

pub use adapters::{EthersLedgerClient, StarNotaryApiClient};
pub use config::{ApiConfig, ConfigError, ListenerConfig};
pub use keepalive::{join_keepalive, spawn_keepalive};
