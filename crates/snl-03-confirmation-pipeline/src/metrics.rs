//! # Pipeline Metrics
//!
//! Prometheus metrics for the confirmation pipeline.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! snl-03-confirmation-pipeline = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `snl_events_queued_total` - Live notifications queued (by type)
//! - `snl_events_dispatched_total` - Events forwarded downstream (by type)
//! - `snl_notify_failures_total` - Downstream calls that failed (by type)
//! - `snl_events_purged_total` - Pending entries purged by reorg notices
//! - `snl_events_evicted_total` - Leftover entries evicted unforwarded
//! - `snl_scans_aborted_total` - Scan passes aborted by a ledger failure
//! - `snl_queue_length` - Pending entries after the last tick

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Live notifications queued, labeled by event type
    pub static ref EVENTS_QUEUED: IntCounterVec = register_int_counter_vec!(
        "snl_events_queued_total",
        "Total number of live notifications queued",
        &["event_type"]
    )
    .expect("Failed to create EVENTS_QUEUED metric");

    /// Events forwarded downstream, labeled by event type
    pub static ref EVENTS_DISPATCHED: IntCounterVec = register_int_counter_vec!(
        "snl_events_dispatched_total",
        "Total number of confirmed events forwarded downstream",
        &["event_type"]
    )
    .expect("Failed to create EVENTS_DISPATCHED metric");

    /// Downstream failures, labeled by event type
    pub static ref NOTIFY_FAILURES: IntCounterVec = register_int_counter_vec!(
        "snl_notify_failures_total",
        "Total number of failed downstream calls",
        &["event_type"]
    )
    .expect("Failed to create NOTIFY_FAILURES metric");

    /// Pending entries purged by reorg notices
    pub static ref EVENTS_PURGED: IntCounter = register_int_counter!(
        "snl_events_purged_total",
        "Total number of pending events purged by reorg notices"
    )
    .expect("Failed to create EVENTS_PURGED metric");

    /// Leftover entries evicted without being forwarded
    pub static ref EVENTS_EVICTED: IntCounter = register_int_counter!(
        "snl_events_evicted_total",
        "Total number of leftover events evicted without being forwarded"
    )
    .expect("Failed to create EVENTS_EVICTED metric");

    /// Scan passes aborted by a ledger failure
    pub static ref SCANS_ABORTED: IntCounter = register_int_counter!(
        "snl_scans_aborted_total",
        "Total number of reconciliation scans aborted"
    )
    .expect("Failed to create SCANS_ABORTED metric");

    /// Pending entries after the last tick
    pub static ref QUEUE_LENGTH: IntGauge = register_int_gauge!(
        "snl_queue_length",
        "Number of events awaiting confirmation"
    )
    .expect("Failed to create QUEUE_LENGTH metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a live notification queued
#[cfg(feature = "metrics")]
pub fn record_event_queued(event_type: &str) {
    EVENTS_QUEUED.with_label_values(&[event_type]).inc();
}

/// Record an event forwarded downstream
#[cfg(feature = "metrics")]
pub fn record_event_dispatched(event_type: &str) {
    EVENTS_DISPATCHED.with_label_values(&[event_type]).inc();
}

/// Record a failed downstream call
#[cfg(feature = "metrics")]
pub fn record_notify_failure(event_type: &str) {
    NOTIFY_FAILURES.with_label_values(&[event_type]).inc();
}

/// Record pending entries purged by a reorg notice
#[cfg(feature = "metrics")]
pub fn record_events_purged(count: usize) {
    EVENTS_PURGED.inc_by(count as u64);
}

/// Record leftover entries evicted
#[cfg(feature = "metrics")]
pub fn record_events_evicted(count: usize) {
    EVENTS_EVICTED.inc_by(count as u64);
}

/// Record an aborted scan pass
#[cfg(feature = "metrics")]
pub fn record_scan_aborted() {
    SCANS_ABORTED.inc();
}

/// Update the queue length gauge
#[cfg(feature = "metrics")]
pub fn set_queue_length(len: usize) {
    QUEUE_LENGTH.set(len as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_event_queued(_event_type: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_event_dispatched(_event_type: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_notify_failure(_event_type: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_events_purged(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_events_evicted(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_scan_aborted() {}

#[cfg(not(feature = "metrics"))]
pub fn set_queue_length(_len: usize) {}
