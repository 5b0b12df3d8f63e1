//! # Outbound Ports
//!
//! Traits for the two external dependencies: the ledger the events come
//! from and the downstream API they are forwarded to.

use async_trait::async_trait;
use primitive_types::{H160, U256};
use shared_types::{
    BlockInfo, ChangeNameEvent, CreateEvent, DecodedEvent, DecodedLog, EventType,
    PurchaseEvent, PutForSaleEvent, RawLog, RemoveFromSaleEvent,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::domain::{LedgerError, NotifyError, PipelineError};

/// Ledger client - outbound port.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Open a live push stream for one event type.
    async fn subscribe(&self, event_type: EventType) -> Result<EventSubscription, LedgerError>;

    /// All logs of `contract` from `from_block` up to the current head.
    async fn filter_logs(&self, contract: H160, from_block: U256)
        -> Result<Vec<RawLog>, LedgerError>;

    /// Current chain height.
    async fn current_height(&self) -> Result<U256, LedgerError>;

    /// Header of the block at `height`.
    async fn block_by_height(&self, height: U256) -> Result<BlockInfo, LedgerError>;

    /// Decode a raw log into a typed Star Notary event.
    fn decode_log(&self, log: &RawLog) -> Result<DecodedEvent, LedgerError>;
}

/// Downstream Star Notary API - outbound port.
///
/// Results are only used for logging; a failed call does not keep the event
/// pending.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// A star was registered.
    async fn create_star(&self, event: &CreateEvent) -> Result<(), NotifyError>;

    /// A star was renamed.
    async fn change_name(&self, event: &ChangeNameEvent) -> Result<(), NotifyError>;

    /// A star was listed for sale.
    async fn put_for_sale(&self, event: &PutForSaleEvent) -> Result<(), NotifyError>;

    /// A star was delisted.
    async fn remove_from_sale(&self, event: &RemoveFromSaleEvent) -> Result<(), NotifyError>;

    /// A star was bought.
    async fn purchase(&self, event: &PurchaseEvent) -> Result<(), NotifyError>;
}

/// Receiving half of a live subscription for one event type.
///
/// The producing half is an `mpsc` sender owned by the ledger adapter. The
/// stream is closed once every sender is dropped and the buffer is drained.
#[derive(Debug)]
pub struct EventSubscription {
    event_type: EventType,
    receiver: mpsc::Receiver<DecodedLog>,
}

impl EventSubscription {
    /// Create a bounded subscription channel.
    pub fn channel(event_type: EventType, capacity: usize) -> (mpsc::Sender<DecodedLog>, Self) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            sender,
            Self {
                event_type,
                receiver,
            },
        )
    }

    /// The event type this stream carries.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Take a ready notification without waiting.
    ///
    /// `Ok(None)` when nothing is buffered, `Err` once the stream is closed.
    pub fn try_recv(&mut self) -> Result<Option<DecodedLog>, PipelineError> {
        match self.receiver.try_recv() {
            Ok(log) => Ok(Some(log)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(PipelineError::SubscriptionClosed(self.event_type))
            }
        }
    }

    /// Wait for the next notification. `None` once the stream is closed.
    ///
    /// Cancel safe.
    pub async fn recv(&mut self) -> Option<DecodedLog> {
        self.receiver.recv().await
    }
}
