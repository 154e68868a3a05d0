//! Refund request and run summary types
//!
//! A [`RefundRequest`] is one validated input row; a [`RunSummary`] is the
//! monotonically accumulated result of a full run.

use rust_decimal::Decimal;

/// A single validated refund to be submitted
///
/// Created by the input loader after per-row validation; immutable afterwards
/// and consumed exactly once by the runner. Duplicate payment IDs are legal
/// and each occurrence is processed independently.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundRequest {
    /// Square payment ID to refund (non-empty after trimming)
    pub payment_id: String,

    /// Refund amount in major currency units (strictly positive)
    pub amount: Decimal,

    /// Physical line number in the input file, for diagnostics
    ///
    /// Starts at 2: line 1 is the header row.
    pub source_row: u64,
}

/// Counters accumulated across one run
///
/// Invariant: `total == successful + failed` after every recorded outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of refunds attempted
    pub total: u64,
    /// Number of refunds the gateway confirmed
    pub successful: u64,
    /// Number of refunds that failed at the gateway or in the call path
    pub failed: u64,
}

impl RunSummary {
    /// Record one successful refund
    pub fn record_success(&mut self) {
        self.total += 1;
        self.successful += 1;
    }

    /// Record one failed refund
    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    /// Success rate as a percentage, or None when nothing was processed
    ///
    /// Returning None for the empty run keeps the caller from ever dividing
    /// by zero; the runner logs a "no valid data" warning instead.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some((self.successful as f64 / self.total as f64) * 100.0)
        }
    }
}
