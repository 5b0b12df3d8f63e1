//! # Ports Layer
//!
//! Outbound ports for the ledger and the downstream API, plus mocks.

pub mod mock;
pub mod outbound;

pub use mock::{MockLedgerClient, RecordingNotificationClient};
pub use outbound::{EventSubscription, LedgerClient, NotificationClient};
