//! # Listener Reactor
//!
//! The control loop. Owns the confirmation queue and the five live
//! subscriptions, and drives the scanner.
//!
//! ## Iteration
//!
//! ```text
//! ┌─ any live notification ready? ──yes──→ normalize, queue, next iteration
//! │          │ no
//! │          ↓
//! │   queue non-empty? ──no──→ wait on all five streams
//! │          │ yes
//! │          ↓
//! │   read head ──fail──→ log, sleep
//! │          ↓
//! │   scan_and_confirm ──→ remove_leftover ──→ sleep
//! └──────────┘
//! ```
//!
//! Live notifications always win over the poll branch.

use std::sync::Arc;

use futures::future::select_all;
use primitive_types::U256;
use shared_types::{DecodedLog, EventType};
use snl_01_event_normalizer::normalize_decoded;
use snl_02_confirmation_queue::ConfirmationQueue;
use tracing::{debug, error, info, warn};

use crate::domain::{PipelineConfig, PipelineError, PipelineResult, ReactorStep};
use crate::metrics;
use crate::ports::{EventSubscription, LedgerClient, NotificationClient};
use crate::service::scanner::ReconciliationScanner;

/// Drives pending events from "observed" to "forwarded" or "discarded".
pub struct ListenerReactor<L: LedgerClient, N: NotificationClient> {
    ledger: Arc<L>,
    queue: Arc<ConfirmationQueue>,
    scanner: ReconciliationScanner<L, N>,
    subscriptions: Vec<EventSubscription>,
    /// Round-robin start position for the next non-blocking poll.
    cursor: usize,
    config: PipelineConfig,
}

impl<L: LedgerClient, N: NotificationClient> ListenerReactor<L, N> {
    /// Creates a reactor with an empty queue and no subscriptions.
    pub fn new(ledger: Arc<L>, notifier: Arc<N>, config: PipelineConfig) -> Self {
        let scanner = ReconciliationScanner::new(Arc::clone(&ledger), notifier, config.clone());
        Self {
            ledger,
            queue: Arc::new(ConfirmationQueue::new()),
            scanner,
            subscriptions: Vec::with_capacity(EventType::ALL.len()),
            cursor: 0,
            config,
        }
    }

    /// The pending queue.
    pub fn queue(&self) -> Arc<ConfirmationQueue> {
        Arc::clone(&self.queue)
    }

    /// Open one live subscription per event type.
    ///
    /// Any failure is fatal: the listener cannot run with a missing stream.
    pub async fn subscribe_all(&mut self) -> PipelineResult<()> {
        self.config.validate()?;
        for event_type in EventType::ALL {
            let subscription = self.ledger.subscribe(event_type).await?;
            info!(event_type = %event_type, "[snl-03] Subscribed to live events");
            self.subscriptions.push(subscription);
        }
        Ok(())
    }

    /// Run until a subscription stream closes.
    pub async fn run(&mut self) -> PipelineResult<()> {
        if self.subscriptions.is_empty() {
            return Err(PipelineError::NotSubscribed);
        }
        info!(
            contract = ?self.config.contract_address,
            confirmation_blocks = self.config.confirmation_blocks,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "[snl-03] Listener reactor started"
        );
        loop {
            self.step().await?;
        }
    }

    /// One iteration of the control loop.
    pub async fn step(&mut self) -> PipelineResult<ReactorStep> {
        if let Some(decoded) = self.try_next_push()? {
            return Ok(self.handle_push(decoded));
        }

        if !self.queue.is_empty() {
            return Ok(self.poll_tick().await);
        }

        let decoded = self.next_push().await?;
        Ok(self.handle_push(decoded))
    }

    /// Non-blocking round-robin poll over the live streams.
    fn try_next_push(&mut self) -> PipelineResult<Option<DecodedLog>> {
        let count = self.subscriptions.len();
        for offset in 0..count {
            let index = (self.cursor + offset) % count;
            if let Some(decoded) = self.subscriptions[index].try_recv()? {
                self.cursor = (index + 1) % count;
                return Ok(Some(decoded));
            }
        }
        Ok(None)
    }

    /// Wait until any live stream yields.
    async fn next_push(&mut self) -> PipelineResult<DecodedLog> {
        if self.subscriptions.is_empty() {
            return Err(PipelineError::NotSubscribed);
        }
        let (decoded, index, _) =
            select_all(self.subscriptions.iter_mut().map(|s| Box::pin(s.recv()))).await;
        match decoded {
            Some(decoded) => Ok(decoded),
            None => Err(PipelineError::SubscriptionClosed(
                self.subscriptions[index].event_type(),
            )),
        }
    }

    fn handle_push(&self, decoded: DecodedLog) -> ReactorStep {
        let Some(event) = normalize_decoded(&decoded) else {
            return ReactorStep::Ignored;
        };

        if event.removed {
            let purged = self.queue.remove_matching(&event);
            info!(
                block = %event.block_number,
                event_type = %event.event_type,
                purged,
                "[snl-03] Live reorg notice"
            );
            metrics::record_events_purged(purged);
            return ReactorStep::Purged(purged);
        }

        let event_type = event.event_type;
        info!(
            block = %event.block_number,
            event_type = %event_type,
            token_id = %event.token_id,
            tx_hash = ?event.tx_hash,
            "[snl-03] Live event received, awaiting confirmation"
        );
        self.queue.insert(event);
        metrics::record_event_queued(event_type.as_str());
        metrics::set_queue_length(self.queue.len());
        ReactorStep::Queued(event_type)
    }

    /// Height, scan, evict, sleep.
    async fn poll_tick(&self) -> ReactorStep {
        let latest = match self.ledger.current_height().await {
            Ok(latest) => latest,
            Err(e) => {
                error!(error = %e, "[snl-03] Could not read chain height");
                tokio::time::sleep(self.config.poll_interval).await;
                return ReactorStep::HeightUnavailable;
            }
        };

        let report = match self.scanner.scan_and_confirm(&self.queue, latest).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(latest = %latest, error = %e, "[snl-03] Scan aborted, retrying next tick");
                metrics::record_scan_aborted();
                None
            }
        };

        // Runs after every pass, aborted or not, so a failing log query
        // cannot grow the queue without bound.
        let evicted = self.evict_leftovers(latest);

        metrics::set_queue_length(self.queue.len());
        debug!(
            latest = %latest,
            pending = self.queue.len(),
            "[snl-03] Tick complete"
        );
        tokio::time::sleep(self.config.poll_interval).await;

        ReactorStep::Scanned { report, evicted }
    }

    fn evict_leftovers(&self, latest: U256) -> usize {
        let evicted = self
            .queue
            .remove_leftover(latest, self.config.confirmation_blocks)
            .len();
        if evicted > 0 {
            metrics::record_events_evicted(evicted);
        }
        evicted
    }
}
