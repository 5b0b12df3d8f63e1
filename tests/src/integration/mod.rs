//! Cross-crate flows: live push, reconciliation scan and dispatch wired
//! together over the mock ledger and the recording API client.

pub mod confirmation;
pub mod decode;
pub mod reorg;
