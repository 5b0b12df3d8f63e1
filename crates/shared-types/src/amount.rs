//! # Ether Amounts
//!
//! Prices travel through the pipeline as integer wei and are only rendered
//! to a decimal ether string at the outbound boundary.

use std::fmt;

use primitive_types::U256;
use serde::{Serialize, Serializer};

/// Number of wei in one ether (10^18).
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// An exact amount of ether, held as wei.
///
/// Equality is by value, so two amounts built from the same wei compare equal
/// regardless of how they were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EtherAmount(U256);

impl EtherAmount {
    /// The zero amount.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Wrap an amount expressed in wei.
    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// The amount in wei.
    pub fn wei(&self) -> U256 {
        self.0
    }

    /// Whether this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<U256> for EtherAmount {
    fn from(wei: U256) -> Self {
        Self(wei)
    }
}

/// Renders ether as a plain decimal: `2.5`, `10`, `0`.
///
/// Trailing fractional zeros and a dangling decimal point are stripped.
impl fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = U256::from(WEI_PER_ETHER);
        let whole = self.0 / unit;
        let fraction = (self.0 % unit).low_u64();

        if fraction == 0 {
            return write!(f, "{}", whole);
        }

        let digits = format!("{:018}", fraction);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl Serialize for EtherAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(value: u128) -> EtherAmount {
        EtherAmount::from_wei(U256::from(value))
    }

    #[test]
    fn test_render_fractional_price() {
        assert_eq!(wei(2_500_000_000_000_000_000).to_string(), "2.5");
    }

    #[test]
    fn test_render_zero() {
        assert_eq!(EtherAmount::zero().to_string(), "0");
    }

    #[test]
    fn test_render_whole_ether_keeps_integer_zeros() {
        assert_eq!(wei(10_000_000_000_000_000_000).to_string(), "10");
        assert_eq!(wei(100_000_000_000_000_000_000).to_string(), "100");
    }

    #[test]
    fn test_render_one_wei() {
        assert_eq!(wei(1).to_string(), "0.000000000000000001");
    }

    #[test]
    fn test_render_beyond_u128() {
        let amount = EtherAmount::from_wei(U256::MAX);
        let rendered = amount.to_string();
        assert!(rendered.starts_with("115792089237316195423570985008687907853269984665640564039457"));
        assert!(!rendered.ends_with('0'));
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(wei(5), EtherAmount::from(U256::from(5u8)));
        assert_ne!(wei(5), wei(6));
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&wei(1_250_000_000_000_000_000)).unwrap();
        assert_eq!(json, "\"1.25\"");
    }
}
