//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Ledger**: `RawLog`, `BlockInfo`
//! - **Decoding**: `EventType`, `DecodedEvent`, `DecodedLog`
//! - **Pending**: `NormalizedEvent`

use std::fmt;

use chrono::{DateTime, Utc};
use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};

use crate::amount::EtherAmount;

// =============================================================================
// CLUSTER A: THE LEDGER
// =============================================================================

/// One log entry as returned by the ledger, before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawLog {
    /// Contract that emitted the log.
    pub address: H160,
    /// Indexed topics; topic 0 is the event signature hash.
    pub topics: Vec<H256>,
    /// ABI-encoded non-indexed payload.
    pub data: Vec<u8>,
    /// Height of the containing block.
    pub block_number: U256,
    /// Hash of the containing block.
    pub block_hash: H256,
    /// Hash of the emitting transaction.
    pub tx_hash: H256,
    /// Position of the transaction within its block.
    pub tx_index: u64,
    /// Position of the log within its block.
    pub log_index: u64,
    /// True when the log was invalidated by a chain reorganization.
    pub removed: bool,
}

impl RawLog {
    /// The event signature hash (topic 0), if present.
    pub fn signature(&self) -> Option<&H256> {
        self.topics.first()
    }
}

/// Header fields of a block needed to stamp confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height.
    pub number: U256,
    /// Block hash.
    pub hash: H256,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
}

impl BlockInfo {
    /// The block timestamp as a UTC instant, if representable.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

// =============================================================================
// CLUSTER B: DECODING
// =============================================================================

/// The five Star Notary events the listener understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A star was registered.
    Create,
    /// A star was renamed.
    ChangeName,
    /// A star was listed for sale.
    PutForSale,
    /// A star was delisted.
    RemoveFromSale,
    /// A star changed hands.
    Purchase,
}

impl EventType {
    /// Every event type, in subscription order.
    pub const ALL: [EventType; 5] = [
        EventType::Create,
        EventType::ChangeName,
        EventType::PutForSale,
        EventType::RemoveFromSale,
        EventType::Purchase,
    ];

    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Create => "create",
            EventType::ChangeName => "change_name",
            EventType::PutForSale => "put_for_sale",
            EventType::RemoveFromSale => "remove_from_sale",
            EventType::Purchase => "purchase",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed payload of a decoded Star Notary log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedEvent {
    /// `Create(owner, tokenId, coordinates, name)`
    Create {
        owner: H160,
        token_id: U256,
        coordinates: String,
        name: String,
    },
    /// `ChangeName(owner, tokenId, newName)`
    ChangeName {
        owner: H160,
        token_id: U256,
        new_name: String,
    },
    /// `PutForSale(owner, tokenId, priceInWei)`
    PutForSale {
        owner: H160,
        token_id: U256,
        price: U256,
    },
    /// `RemoveFromSale(owner, tokenId)`
    RemoveFromSale { owner: H160, token_id: U256 },
    /// `Purchase(newOwner, tokenId)`
    Purchase { new_owner: H160, token_id: U256 },
}

impl DecodedEvent {
    /// The event type this payload belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            DecodedEvent::Create { .. } => EventType::Create,
            DecodedEvent::ChangeName { .. } => EventType::ChangeName,
            DecodedEvent::PutForSale { .. } => EventType::PutForSale,
            DecodedEvent::RemoveFromSale { .. } => EventType::RemoveFromSale,
            DecodedEvent::Purchase { .. } => EventType::Purchase,
        }
    }

    /// The acting account (owner, or new owner for a purchase).
    pub fn sender(&self) -> H160 {
        match self {
            DecodedEvent::Create { owner, .. }
            | DecodedEvent::ChangeName { owner, .. }
            | DecodedEvent::PutForSale { owner, .. }
            | DecodedEvent::RemoveFromSale { owner, .. } => *owner,
            DecodedEvent::Purchase { new_owner, .. } => *new_owner,
        }
    }

    /// The star token id.
    pub fn token_id(&self) -> U256 {
        match self {
            DecodedEvent::Create { token_id, .. }
            | DecodedEvent::ChangeName { token_id, .. }
            | DecodedEvent::PutForSale { token_id, .. }
            | DecodedEvent::RemoveFromSale { token_id, .. }
            | DecodedEvent::Purchase { token_id, .. } => *token_id,
        }
    }
}

/// A decoded payload together with the log it came from.
///
/// This is what live subscriptions deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLog {
    pub event: DecodedEvent,
    pub log: RawLog,
}

// =============================================================================
// CLUSTER C: PENDING EVENTS
// =============================================================================

/// The uniform record held in the confirmation queue.
///
/// Built once from a decoded log and never mutated, except for `confirmed_at`
/// which is stamped when the event is confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedEvent {
    pub event_type: EventType,
    pub contract_hash: H160,
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
    pub block_number: U256,
    pub block_hash: H256,
    pub tx_hash: H256,
    pub tx_index: u64,
    pub log_index: u64,
    pub removed: bool,
    /// EIP-55 checksummed acting account.
    pub sender: String,
    /// Token id in decimal.
    pub token_id: String,
    /// Star name (Create and ChangeName only, empty otherwise).
    pub name: String,
    /// Star coordinates (Create only, empty otherwise).
    pub coordinates: String,
    /// Asking price (PutForSale only, zero otherwise).
    pub price: EtherAmount,
    /// Timestamp of the containing block, set at confirmation.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl NormalizedEvent {
    /// Whether `other` describes the same ledger log.
    ///
    /// Compares the ledger coordinates and payload. `removed`, `event_type`
    /// and `confirmed_at` are ignored, so a reorg notice for a pending event
    /// matches it.
    pub fn is_same_log(&self, other: &NormalizedEvent) -> bool {
        self.block_number == other.block_number
            && self.log_index == other.log_index
            && self.tx_index == other.tx_index
            && self.block_hash == other.block_hash
            && self.tx_hash == other.tx_hash
            && self.contract_hash == other.contract_hash
            && self.topics == other.topics
            && self.data == other.data
            && self.sender == other.sender
            && self.token_id == other.token_id
            && self.name == other.name
            && self.coordinates == other.coordinates
            && self.price == other.price
    }

    /// Blocks mined on top of this event's block, or `None` when the block is
    /// ahead of `latest`.
    pub fn confirmations(&self, latest: U256) -> Option<U256> {
        latest.checked_sub(self.block_number)
    }

    /// Whether the event has at least `depth` confirmations at `latest`.
    pub fn is_confirmed_at(&self, latest: U256, depth: u64) -> bool {
        self.confirmations(latest)
            .map(|c| c >= U256::from(depth))
            .unwrap_or(false)
    }

    /// Whether the event aged past `depth` without being confirmed.
    pub fn is_leftover_at(&self, latest: U256, depth: u64) -> bool {
        self.confirmations(latest)
            .map(|c| c > U256::from(depth))
            .unwrap_or(false)
    }

    /// Copy of this event stamped with its confirmation time.
    pub fn confirmed(&self, at: DateTime<Utc>) -> Self {
        Self {
            confirmed_at: Some(at),
            ..self.clone()
        }
    }
}
