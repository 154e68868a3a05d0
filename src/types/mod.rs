//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `request`: Validated refund requests and run counters
//! - `outcome`: Per-row refund outcomes and failure classification
//! - `error`: Fatal error types for the refund runner

pub mod error;
pub mod outcome;
pub mod request;

pub use error::RefundError;
pub use outcome::{ApiErrorEntry, FailureDetail, RefundOutcome};
pub use request::{RefundRequest, RunSummary};
