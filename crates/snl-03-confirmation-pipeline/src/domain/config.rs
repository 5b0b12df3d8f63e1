//! Pipeline configuration. Read once at startup, never mutated.

use std::time::Duration;

use primitive_types::H160;

use super::errors::PipelineError;

/// Default confirmation depth in blocks.
pub const DEFAULT_CONFIRMATION_BLOCKS: u64 = 12;

/// Default delay between reconciliation scans.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Default capacity of each live subscription channel.
pub const DEFAULT_SUBSCRIPTION_BUFFER: usize = 256;

/// Configuration for the reactor and scanner.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Star Notary contract whose logs are scanned.
    pub contract_address: H160,
    /// Blocks that must be mined on top of an event's block before it is
    /// forwarded. Also the leftover eviction threshold.
    pub confirmation_blocks: u64,
    /// Delay after each reconciliation tick.
    pub poll_interval: Duration,
    /// Capacity of each live subscription channel.
    pub subscription_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            contract_address: H160::zero(),
            confirmation_blocks: DEFAULT_CONFIRMATION_BLOCKS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            subscription_buffer: DEFAULT_SUBSCRIPTION_BUFFER,
        }
    }
}

impl PipelineConfig {
    /// Config for a contract with default depth and interval.
    pub fn for_contract(contract_address: H160) -> Self {
        Self {
            contract_address,
            ..Default::default()
        }
    }

    /// Reject settings the reactor cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.poll_interval.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.subscription_buffer == 0 {
            return Err(PipelineError::InvalidConfig(
                "subscription buffer must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
