//! # Service Layer
//!
//! The reactor, the reconciliation scanner and the dispatcher.

pub mod dispatcher;
pub mod reactor;
pub mod scanner;

pub use dispatcher::{project, Dispatcher};
pub use reactor::ListenerReactor;
pub use scanner::ReconciliationScanner;
