//! # Adapters
//!
//! Concrete implementations of the pipeline's outbound ports.
//!
//! - `abi` - Star Notary log decoding
//! - `ethers_ledger` - `LedgerClient` over an ethers websocket provider
//! - `star_notary_api` - `NotificationClient` over reqwest

pub mod abi;
pub mod ethers_ledger;
pub mod star_notary_api;

pub use ethers_ledger::EthersLedgerClient;
pub use star_notary_api::{ApiClientError, StarNotaryApiClient};
