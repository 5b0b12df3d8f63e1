//! # SNL-02 Confirmation Queue
//!
//! The in-memory set of events observed on the ledger but not yet confirmed.
//!
//! **Subsystem ID:** 02
//!
//! ## Guarantees
//!
//! | Property | How |
//! |----------|-----|
//! | Ordered | stable sort ascending by block height after every insert |
//! | Atomic | every operation holds the queue lock for its whole duration |
//! | Content identity | removal matches on `NormalizedEvent::is_same_log` |
//! | Bounded | `remove_leftover` drops events aged past the confirmation depth |
//!
//! The queue is not persisted. A restart forgets every pending event.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod queue;

pub use queue::ConfirmationQueue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
