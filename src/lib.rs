//! Square Refund Runner Library
//! # Overview
//!
//! This library processes a CSV file of `payment_id,amount` rows, submits one
//! refund per validated row to the Square Refunds API, and records every
//! outcome to a timestamped run log.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (RefundRequest, RefundOutcome, RunSummary, errors)
//! - [`cli`] - CLI argument parsing
//! - [`io`] - Input loading with delimiter auto-detection and per-row validation
//! - [`gateway`] - The RefundGateway capability trait and its Square-backed
//!   HTTP implementation
//! - [`core`] - The refund runner: sequential submission, outcome
//!   classification, summary accumulation
//! - [`logging`] - The per-run log context (file sink mirrored to the console)
//!
//! # Processing model
//!
//! Loading happens fully before any refund is attempted: structural problems
//! (missing file, missing `payment_id`/`amount` columns) abort the run with
//! zero calls made, while malformed rows are skipped with a warning. The
//! runner then walks the validated requests strictly sequentially. Each row
//! gets a fresh idempotency token and its amount converted to minor currency
//! units (truncating multiplication by 100); every failure is contained to
//! its row, counted, and logged, so one decline never stops the batch.
//!
//! # Exit behavior
//!
//! The binary exits 0 only when every attempted refund succeeded (including
//! the zero-valid-rows case) and 1 when any refund failed or the input could
//! not be loaded.

// Module declarations
pub mod cli;
pub mod core;
pub mod gateway;
pub mod io;
pub mod logging;
pub mod types;

pub use crate::core::{RefundRunner, RunConfig};
pub use gateway::{GatewayError, RefundCall, RefundGateway, RefundReceipt, SquareGateway};
pub use io::load_refund_requests;
pub use logging::RunLog;
pub use types::{
    ApiErrorEntry, FailureDetail, RefundError, RefundOutcome, RefundRequest, RunSummary,
};
