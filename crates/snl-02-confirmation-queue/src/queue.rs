//! # Confirmation Queue
//!
//! Ordered list of pending [`NormalizedEvent`]s.
//!
//! ## Invariants Enforced
//!
//! - Entries are sorted ascending by `block_number` after every insert.
//!   The sort is stable, so events from the same block keep arrival order.
//! - Every operation is one critical section. A concurrent reader never sees
//!   an unsorted or half-removed list.
//! - Removal is by content identity, never by position.

use parking_lot::Mutex;
use primitive_types::U256;
use shared_types::NormalizedEvent;
use tracing::{debug, warn};

/// Pending events awaiting confirmation depth.
#[derive(Debug, Default)]
pub struct ConfirmationQueue {
    events: Mutex<Vec<NormalizedEvent>>,
}

impl ConfirmationQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and restore ascending block order.
    ///
    /// Duplicates are not rejected here; identical entries are all retired
    /// together by [`remove_matching`](Self::remove_matching).
    pub fn insert(&self, event: NormalizedEvent) {
        let mut events = self.events.lock();
        debug!(
            block = %event.block_number,
            event_type = %event.event_type,
            tx_hash = ?event.tx_hash,
            "[snl-02] Queueing pending event"
        );
        events.push(event);
        events.sort_by(|a, b| a.block_number.cmp(&b.block_number));
    }

    /// Block height of the oldest pending event, or zero when empty.
    pub fn first_block_number(&self) -> U256 {
        self.events
            .lock()
            .first()
            .map(|e| e.block_number)
            .unwrap_or_default()
    }

    /// Remove every entry identical to `event`. Returns how many were removed.
    ///
    /// Idempotent: a second call with the same event removes nothing.
    pub fn remove_matching(&self, event: &NormalizedEvent) -> usize {
        let mut events = self.events.lock();
        let before = events.len();
        events.retain(|pending| !pending.is_same_log(event));
        before - events.len()
    }

    /// Evict every entry with more than `depth` confirmations at `latest`.
    ///
    /// Such events were never reconciled by a scan and cannot confirm any
    /// more. An entry whose block is ahead of `latest` is kept. The evicted
    /// events are returned, oldest first.
    pub fn remove_leftover(&self, latest: U256, depth: u64) -> Vec<NormalizedEvent> {
        let mut events = self.events.lock();
        let (evicted, kept): (Vec<_>, Vec<_>) = events
            .drain(..)
            .partition(|e| e.is_leftover_at(latest, depth));
        *events = kept;
        drop(events);

        for event in &evicted {
            warn!(
                block = %event.block_number,
                latest = %latest,
                event_type = %event.event_type,
                tx_hash = ?event.tx_hash,
                token_id = %event.token_id,
                "[snl-02] Evicting leftover event, it will not be forwarded"
            );
        }
        evicted
    }

    /// Whether an identical entry is pending.
    pub fn contains(&self, event: &NormalizedEvent) -> bool {
        self.events.lock().iter().any(|e| e.is_same_log(event))
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Copy of the pending entries in queue order.
    pub fn snapshot(&self) -> Vec<NormalizedEvent> {
        self.events.lock().clone()
    }
}
