//! Outcomes of one scan pass and one reactor iteration.

use shared_types::EventType;

/// Tally of one reconciliation scan pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Logs returned by the ledger for this pass.
    pub scanned: usize,
    /// Logs with an untracked signature.
    pub ignored: usize,
    /// Logs that failed to decode. These are lost.
    pub undecodable: usize,
    /// Pending entries purged by reorg notices.
    pub purged: usize,
    /// Logs still short of the confirmation depth.
    pub pending: usize,
    /// Confirmed logs with no pending entry (not pushed yet, already
    /// forwarded, or evicted).
    pub untracked: usize,
    /// Events forwarded downstream and retired.
    pub dispatched: usize,
}

/// What one reactor iteration did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactorStep {
    /// A live notification was queued.
    Queued(EventType),
    /// A live reorg notice purged this many pending entries.
    Purged(usize),
    /// A live notification was dropped (untracked signature).
    Ignored,
    /// A reconciliation tick ran. `None` when the scan aborted.
    Scanned {
        /// Scan tally, if the pass completed.
        report: Option<ScanReport>,
        /// Leftover events evicted after the scan.
        evicted: usize,
    },
    /// The chain height could not be read; the tick was abandoned.
    HeightUnavailable,
}
