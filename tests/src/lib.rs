//! # Star Notary Listener Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Log builders shared by the flows
//! └── integration/      # Cross-crate flows over the mock ledger
//!     ├── confirmation.rs
//!     ├── reorg.rs
//!     └── decode.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p snl-tests
//! cargo test -p snl-tests integration::reorg
//!
//! # Benchmarks
//! cargo bench -p snl-tests
//! ```

pub mod fixtures;
pub mod integration;
