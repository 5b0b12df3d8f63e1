//! # Shared Types Crate
//!
//! Domain entities shared by the listener subsystems.
//!
//! ## Contents
//!
//! - **Ledger envelopes**: `RawLog`, `DecodedEvent`, `DecodedLog`, `BlockInfo`
//! - **Pending state**: `NormalizedEvent`, the single record held by the
//!   confirmation queue
//! - **Value objects**: `EtherAmount` (exact wei), EIP-55 addresses
//! - **Outbound shapes**: the five narrow payloads sent downstream
//!
//! ## Design Principles
//!
//! - **Identity by content**: a pending event has no synthetic key. Two
//!   events are the same log when their ledger coordinates and payload agree
//!   (see [`NormalizedEvent::is_same_log`]).
//! - **No floats on money**: prices stay integer wei until rendered.

pub mod address;
pub mod amount;
pub mod entities;
pub mod errors;
pub mod outbound;

pub use address::{parse_address, to_checksum};
pub use amount::EtherAmount;
pub use entities::*;
pub use errors::*;
pub use outbound::*;

// Re-export primitives so every subsystem agrees on one set of hash types
pub use primitive_types::{H160, H256, U256};
