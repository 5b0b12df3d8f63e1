//! # Domain Layer
//!
//! Configuration, scan outcomes and errors of the confirmation pipeline.

pub mod config;
pub mod errors;
pub mod report;

pub use config::PipelineConfig;
pub use errors::{LedgerError, NotifyError, PipelineError, PipelineResult};
pub use report::{ReactorStep, ScanReport};
