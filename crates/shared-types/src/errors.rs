//! # Error Types
//!
//! Errors raised while parsing shared value objects.

use thiserror::Error;

/// Errors that can occur when parsing a ledger address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The `0x` prefix is missing.
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),

    /// The body is not hexadecimal.
    #[error("Address is not valid hex: {0}")]
    InvalidHex(String),

    /// The decoded address does not have 20 bytes.
    #[error("Address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}
