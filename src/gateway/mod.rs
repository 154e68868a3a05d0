//! Refund gateway abstraction
//!
//! The runner depends on the narrow [`RefundGateway`] capability rather than
//! a concrete HTTP client, so tests substitute a scripted in-memory gateway
//! and never construct network clients. The real Square-backed
//! implementation lives in [`square`].

use crate::types::ApiErrorEntry;
use serde::Serialize;
use thiserror::Error;

pub mod square;

pub use square::SquareGateway;

/// Wire-level refund request handed to a gateway
///
/// Amounts are in minor currency units (cents for USD), already converted
/// and truncated by the runner. The idempotency key is unique per row per
/// run, so a retried delivery of the same call is deduplicated by the API
/// while two different rows are never conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundCall {
    /// Unique key for API-side deduplication
    pub idempotency_key: String,
    /// Refund amount in minor currency units
    pub amount_minor_units: i64,
    /// ISO currency code
    pub currency: String,
    /// Payment to refund
    pub payment_id: String,
    /// Operator-facing reason recorded with the refund
    pub reason: String,
}

/// Success payload returned by a gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundReceipt {
    /// Refund ID assigned by the API
    pub refund_id: String,
    /// Refund status reported by the API
    pub status: String,
    /// Refunded amount in minor currency units
    pub amount_minor_units: i64,
    /// Currency code reported by the API
    pub currency: String,
    /// Creation timestamp reported by the API (RFC 3339)
    pub created_at: String,
}

/// Failure payload returned by a gateway
///
/// The three variants map one-to-one onto the failure categories the runner
/// records: a structured decline, a transport/API-level exception, and
/// everything else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The API answered the call with a structured error payload
    #[error("refund declined ({} error(s))", errors.len())]
    Declined {
        /// Error entries from the API response body
        errors: Vec<ApiErrorEntry>,
    },

    /// Transport or API-level failure (connection refused, timeout, TLS)
    #[error("API exception: {message}")]
    Api {
        /// Description of the failure
        message: String,
    },

    /// Anything else raised in the call path
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Description of the failure
        message: String,
    },
}

/// Capability interface for submitting refunds
///
/// A blocking, synchronous call: it either returns a receipt, or an error
/// classified into one of the [`GatewayError`] variants. Implementations
/// must not panic on API failures.
pub trait RefundGateway {
    /// Submit one refund call and classify the result
    fn submit_refund(&self, call: &RefundCall) -> Result<RefundReceipt, GatewayError>;
}
