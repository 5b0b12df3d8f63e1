//! # Reconciliation Scanner
//!
//! Pulls the contract's logs from the oldest pending block to the head and
//! reconciles them against the confirmation queue.
//!
//! ## Per-log Decision
//!
//! ```text
//! untracked signature ──────────────→ skip
//! decode failure ───────────────────→ skip (lost, logged)
//! removed ──────────────────────────→ purge identical pending entries
//! fewer than depth confirmations ───→ skip (stays pending)
//! not pending ──────────────────────→ skip
//! block timestamp unavailable ──────→ abort pass
//! otherwise ────────────────────────→ stamp, dispatch, retire
//! ```
//!
//! An event is only forwarded when the pull and the push both saw it: the
//! push queues it, the pull confirms it. Retiring it right after dispatch
//! makes a second sighting a no-op.

use std::sync::Arc;

use primitive_types::U256;
use snl_01_event_normalizer::{event_type_for, normalize};
use snl_02_confirmation_queue::ConfirmationQueue;
use tracing::{debug, info, warn};

use crate::domain::{PipelineConfig, PipelineError, PipelineResult, ScanReport};
use crate::metrics;
use crate::ports::{LedgerClient, NotificationClient};
use crate::service::dispatcher::Dispatcher;

/// Confirms pending events against the ledger's view of the chain.
pub struct ReconciliationScanner<L: LedgerClient, N: NotificationClient> {
    ledger: Arc<L>,
    dispatcher: Dispatcher<N>,
    config: PipelineConfig,
}

impl<L: LedgerClient, N: NotificationClient> ReconciliationScanner<L, N> {
    /// Creates a scanner.
    pub fn new(ledger: Arc<L>, notifier: Arc<N>, config: PipelineConfig) -> Self {
        Self {
            ledger,
            dispatcher: Dispatcher::new(notifier),
            config,
        }
    }

    /// Run one reconciliation pass with `latest` as the chain head.
    ///
    /// Logs are processed in ledger order. A failed log query or block
    /// lookup aborts the rest of the pass; events already forwarded in this
    /// pass stay retired.
    pub async fn scan_and_confirm(
        &self,
        queue: &ConfirmationQueue,
        latest: U256,
    ) -> PipelineResult<ScanReport> {
        let from_block = queue.first_block_number();
        let logs = self
            .ledger
            .filter_logs(self.config.contract_address, from_block)
            .await?;

        let depth = self.config.confirmation_blocks;
        let mut report = ScanReport {
            scanned: logs.len(),
            ..Default::default()
        };

        for log in &logs {
            if log.signature().and_then(event_type_for).is_none() {
                report.ignored += 1;
                continue;
            }

            let decoded = match self.ledger.decode_log(log) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!(
                        block = %log.block_number,
                        tx_hash = ?log.tx_hash,
                        error = %e,
                        "[snl-03] Skipping undecodable log"
                    );
                    report.undecodable += 1;
                    continue;
                }
            };

            let Some(event) = normalize(&decoded, log) else {
                report.ignored += 1;
                continue;
            };

            if event.removed {
                let purged = queue.remove_matching(&event);
                if purged > 0 {
                    info!(
                        block = %event.block_number,
                        event_type = %event.event_type,
                        tx_hash = ?event.tx_hash,
                        "[snl-03] Purged event removed by reorg"
                    );
                    metrics::record_events_purged(purged);
                }
                report.purged += purged;
                continue;
            }

            if !event.is_confirmed_at(latest, depth) {
                report.pending += 1;
                continue;
            }

            if !queue.contains(&event) {
                debug!(
                    block = %event.block_number,
                    event_type = %event.event_type,
                    "[snl-03] Confirmed log has no pending entry"
                );
                report.untracked += 1;
                continue;
            }

            let block = self.ledger.block_by_height(event.block_number).await?;
            let confirmed_at =
                block
                    .timestamp_utc()
                    .ok_or(PipelineError::InvalidBlockTimestamp {
                        block: block.number,
                        timestamp: block.timestamp,
                    })?;

            let confirmed = event.confirmed(confirmed_at);
            self.dispatcher.dispatch(&confirmed).await;
            queue.remove_matching(&confirmed);
            report.dispatched += 1;
        }

        debug!(
            from_block = %from_block,
            latest = %latest,
            ?report,
            "[snl-03] Scan pass complete"
        );
        Ok(report)
    }
}
