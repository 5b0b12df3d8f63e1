//! # Mock Implementations for Testing
//!
//! Scriptable in-memory ledger and a recording downstream client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use primitive_types::{H160, H256, U256};
use shared_types::{
    BlockInfo, ChangeNameEvent, CreateEvent, DecodedEvent, DecodedLog, EventType, OutboundEvent,
    PurchaseEvent, PutForSaleEvent, RawLog, RemoveFromSaleEvent,
};
use tokio::sync::mpsc;

use super::outbound::{EventSubscription, LedgerClient, NotificationClient};
use crate::domain::{LedgerError, NotifyError};

/// Timestamp of block zero in the mock chain.
pub const MOCK_GENESIS_TIMESTAMP: u64 = 1_600_000_000;

/// Seconds between mock blocks.
pub const MOCK_BLOCK_TIME: u64 = 12;

/// Mock ledger client.
///
/// Logs added with [`add_log`](Self::add_log) are what `filter_logs` returns.
/// Live notifications are injected with [`push`](Self::push).
#[derive(Default)]
pub struct MockLedgerClient {
    height: Mutex<U256>,
    logs: Mutex<Vec<(RawLog, Option<DecodedEvent>)>>,
    timestamps: Mutex<HashMap<U256, u64>>,
    senders: Mutex<HashMap<EventType, mpsc::Sender<DecodedLog>>>,
    filter_calls: Mutex<Vec<U256>>,
    /// Fail `current_height`.
    pub fail_height: AtomicBool,
    /// Fail `filter_logs`.
    pub fail_filter: AtomicBool,
    /// Fail `block_by_height`.
    pub fail_blocks: AtomicBool,
    /// Fail `subscribe`.
    pub fail_subscribe: AtomicBool,
}

impl MockLedgerClient {
    /// Creates an empty mock chain at height zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain head.
    pub fn set_height(&self, height: u64) {
        *self.height.lock() = U256::from(height);
    }

    /// Make a log visible to `filter_logs`.
    pub fn add_log(&self, log: &DecodedLog) {
        self.logs
            .lock()
            .push((log.log.clone(), Some(log.event.clone())));
    }

    /// Make a log visible to `filter_logs` that fails to decode.
    pub fn add_undecodable_log(&self, log: RawLog) {
        self.logs.lock().push((log, None));
    }

    /// Forget every scripted log.
    pub fn clear_logs(&self) {
        self.logs.lock().clear();
    }

    /// Override the timestamp of one block.
    pub fn set_block_timestamp(&self, height: u64, timestamp: u64) {
        self.timestamps.lock().insert(U256::from(height), timestamp);
    }

    /// Deliver a live notification. Returns false when nobody is subscribed
    /// or the channel is full.
    pub fn push(&self, log: DecodedLog) -> bool {
        let event_type = log.event.event_type();
        match self.senders.lock().get(&event_type) {
            Some(sender) => sender.try_send(log).is_ok(),
            None => false,
        }
    }

    /// Drop the producing half of one subscription.
    pub fn close_subscription(&self, event_type: EventType) {
        self.senders.lock().remove(&event_type);
    }

    /// `from_block` of every `filter_logs` call, in call order.
    pub fn filter_calls(&self) -> Vec<U256> {
        self.filter_calls.lock().clone()
    }

    fn timestamp_of(&self, height: U256) -> u64 {
        self.timestamps
            .lock()
            .get(&height)
            .copied()
            .unwrap_or_else(|| MOCK_GENESIS_TIMESTAMP + height.low_u64() * MOCK_BLOCK_TIME)
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn subscribe(&self, event_type: EventType) -> Result<EventSubscription, LedgerError> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(LedgerError::Subscription {
                event_type,
                reason: "Mock failure".to_string(),
            });
        }
        let (sender, subscription) = EventSubscription::channel(event_type, 64);
        self.senders.lock().insert(event_type, sender);
        Ok(subscription)
    }

    async fn filter_logs(
        &self,
        contract: H160,
        from_block: U256,
    ) -> Result<Vec<RawLog>, LedgerError> {
        self.filter_calls.lock().push(from_block);
        if self.fail_filter.load(Ordering::SeqCst) {
            return Err(LedgerError::Query("Mock failure".to_string()));
        }
        Ok(self
            .logs
            .lock()
            .iter()
            .map(|(raw, _)| raw)
            .filter(|raw| raw.address == contract && raw.block_number >= from_block)
            .cloned()
            .collect())
    }

    async fn current_height(&self) -> Result<U256, LedgerError> {
        if self.fail_height.load(Ordering::SeqCst) {
            return Err(LedgerError::Connection("Mock failure".to_string()));
        }
        Ok(*self.height.lock())
    }

    async fn block_by_height(&self, height: U256) -> Result<BlockInfo, LedgerError> {
        if self.fail_blocks.load(Ordering::SeqCst) {
            return Err(LedgerError::Query("Mock failure".to_string()));
        }
        if height > *self.height.lock() {
            return Err(LedgerError::BlockNotFound(height));
        }
        Ok(BlockInfo {
            number: height,
            hash: H256::from_low_u64_be(height.low_u64()),
            timestamp: self.timestamp_of(height),
        })
    }

    fn decode_log(&self, log: &RawLog) -> Result<DecodedEvent, LedgerError> {
        self.logs
            .lock()
            .iter()
            .find(|(raw, _)| raw == log)
            .and_then(|(_, decoded)| decoded.clone())
            .ok_or_else(|| LedgerError::Decode("Mock undecodable log".to_string()))
    }
}

/// Downstream client that records every call.
#[derive(Default)]
pub struct RecordingNotificationClient {
    calls: Mutex<Vec<OutboundEvent>>,
    /// Answer every call with an error (calls are still recorded).
    pub should_fail: AtomicBool,
}

impl RecordingNotificationClient {
    /// Creates a client with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in call order.
    pub fn calls(&self) -> Vec<OutboundEvent> {
        self.calls.lock().clone()
    }

    /// Number of calls for one event type.
    pub fn count_for(&self, event_type: EventType) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.event_type() == event_type)
            .count()
    }

    fn record(&self, event: OutboundEvent) -> Result<(), NotifyError> {
        let route = event.event_type().as_str().to_string();
        self.calls.lock().push(event);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Status { route, status: 500 });
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationClient for RecordingNotificationClient {
    async fn create_star(&self, event: &CreateEvent) -> Result<(), NotifyError> {
        self.record(OutboundEvent::Create(event.clone()))
    }

    async fn change_name(&self, event: &ChangeNameEvent) -> Result<(), NotifyError> {
        self.record(OutboundEvent::ChangeName(event.clone()))
    }

    async fn put_for_sale(&self, event: &PutForSaleEvent) -> Result<(), NotifyError> {
        self.record(OutboundEvent::PutForSale(event.clone()))
    }

    async fn remove_from_sale(&self, event: &RemoveFromSaleEvent) -> Result<(), NotifyError> {
        self.record(OutboundEvent::RemoveFromSale(event.clone()))
    }

    async fn purchase(&self, event: &PurchaseEvent) -> Result<(), NotifyError> {
        self.record(OutboundEvent::Purchase(event.clone()))
    }
}
