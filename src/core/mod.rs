//! Core business logic
//!
//! Contains the refund runner, the only component with decision-making:
//! outcome classification, counter accumulation, and failure isolation.

pub mod runner;

pub use runner::{RefundRunner, RunConfig};
