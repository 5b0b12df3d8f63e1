//! # SNL-03 Confirmation Pipeline
//!
//! Takes Star Notary events from "observed on the ledger" to "confirmed and
//! forwarded downstream", at most once each.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Two racy sources report the same ledger log:
//! - a live push subscription per event type, which queues the event
//! - a periodic pull of historical logs, which confirms queued events once
//!   they are `confirmation_blocks` deep
//!
//! Forwarding requires both; retiring the event immediately after dispatch
//! makes any later sighting a no-op. Events removed by a reorg are purged,
//! and events that age past the confirmation depth unreconciled are evicted.
//!
//! ## Module Structure
//!
//! ```text
//! snl-03-confirmation-pipeline/
//! ├── domain/     # PipelineConfig, ScanReport, ReactorStep, errors
//! ├── ports/      # LedgerClient, NotificationClient, EventSubscription, mocks
//! ├── service/    # ListenerReactor, ReconciliationScanner, Dispatcher
//! └── metrics     # optional Prometheus counters (`metrics` feature)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    LedgerError, NotifyError, PipelineConfig, PipelineError, PipelineResult, ReactorStep,
    ScanReport,
};
pub use ports::{
    EventSubscription, LedgerClient, MockLedgerClient, NotificationClient,
    RecordingNotificationClient,
};
pub use service::{project, Dispatcher, ListenerReactor, ReconciliationScanner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
