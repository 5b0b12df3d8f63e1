//! # SNL-01 Event Normalizer
//!
//! Turns decoded Star Notary logs into the uniform [`NormalizedEvent`] held
//! by the confirmation queue.
//!
//! **Subsystem ID:** 01
//!
//! ## Purpose
//!
//! - Map a log's signature hash (topic 0) to its logical [`EventType`]
//!   through a static table
//! - Flatten the five typed payloads into one record with identity fields
//!   copied from the log envelope
//!
//! Unknown signatures are filtered, not errors: [`normalize`] returns `None`.
//!
//! ## Module Structure
//!
//! ```text
//! snl-01-event-normalizer/
//! ├── signatures   # signature hash <-> event type table
//! └── normalize    # DecodedEvent + RawLog -> NormalizedEvent
//! ```
//!
//! [`NormalizedEvent`]: shared_types::NormalizedEvent
//! [`EventType`]: shared_types::EventType

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod normalize;
pub mod signatures;

pub use normalize::{normalize, normalize_decoded};
pub use signatures::{
    event_type_for, signature_for, CHANGE_NAME_SIGNATURE, CREATE_SIGNATURE, PURCHASE_SIGNATURE,
    PUT_FOR_SALE_SIGNATURE, REMOVE_FROM_SALE_SIGNATURE,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
