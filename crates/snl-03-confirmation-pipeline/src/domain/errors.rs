//! # Error Types
//!
//! Errors for the confirmation pipeline and its two outbound ports.

use primitive_types::U256;
use shared_types::EventType;
use thiserror::Error;

/// Failures reported by a ledger client.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The connection to the ledger endpoint failed.
    #[error("Ledger connection error: {0}")]
    Connection(String),

    /// A live subscription could not be opened.
    #[error("Subscription to {event_type} failed: {reason}")]
    Subscription {
        /// Event type of the failed subscription.
        event_type: EventType,
        /// Underlying cause.
        reason: String,
    },

    /// A query (logs, height) failed.
    #[error("Ledger query failed: {0}")]
    Query(String),

    /// The requested block does not exist.
    #[error("Block {0} not found")]
    BlockNotFound(U256),

    /// A log could not be decoded into a Star Notary event.
    #[error("Failed to decode log: {0}")]
    Decode(String),
}

/// Failures reported by the downstream notification client.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// The request did not complete.
    #[error("Request to {route} failed: {reason}")]
    Transport {
        /// Downstream route.
        route: String,
        /// Underlying cause.
        reason: String,
    },

    /// The downstream answered with a non-success status.
    #[error("{route} returned HTTP {status}")]
    Status {
        /// Downstream route.
        route: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Errors that stop a scan pass or the reactor.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// A ledger call failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A live subscription stream ended.
    #[error("Subscription stream for {0} closed")]
    SubscriptionClosed(EventType),

    /// `run` was called before any subscription was opened.
    #[error("Reactor has no live subscriptions")]
    NotSubscribed,

    /// A block carried a timestamp that cannot be represented.
    #[error("Block {block} has invalid timestamp {timestamp}")]
    InvalidBlockTimestamp {
        /// Block height.
        block: U256,
        /// Raw timestamp.
        timestamp: u64,
    },

    /// The pipeline configuration is unusable.
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
