//! EIP-55 mixed-case address encoding.
//!
//! Implemented over `sha3` so the core crates stay free of `ethers`; the
//! ledger adapter tests check it against `ethers::utils::to_checksum`.

use primitive_types::H160;
use sha3::{Digest, Keccak256};

use crate::errors::AddressError;

/// Render an address in EIP-55 checksummed form (`0x` + 40 mixed-case hex).
pub fn to_checksum(address: &H160) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a `0x`-prefixed hex address. Case is not validated.
pub fn parse_address(input: &str) -> Result<H160, AddressError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| AddressError::MissingPrefix(trimmed.to_string()))?;

    let bytes = hex::decode(body).map_err(|_| AddressError::InvalidHex(trimmed.to_string()))?;
    if bytes.len() != 20 {
        return Err(AddressError::InvalidLength(bytes.len()));
    }
    Ok(H160::from_slice(&bytes))
}
