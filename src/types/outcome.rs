//! Per-row refund outcome types
//!
//! Every submitted [`RefundRequest`](crate::types::RefundRequest) produces
//! exactly one [`RefundOutcome`]. Outcomes are never mutated after creation;
//! they feed the run summary and the log, nothing else.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// One structured error entry from the Square API error payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorEntry {
    /// Machine-readable error code (e.g. `PAYMENT_NOT_FOUND`)
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable explanation
    #[serde(default)]
    pub detail: Option<String>,
}

impl fmt::Display for ApiErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("UNKNOWN"),
            self.detail.as_deref().unwrap_or("No details")
        )
    }
}

/// How a refund call failed
///
/// Mirrors the three failure shapes the gateway can produce: a structured
/// decline from the API, a transport/API-level exception, or anything else
/// unexpected raised in the call path.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureDetail {
    /// The API answered with a structured error payload
    Declined {
        /// Error entries as returned by the API
        errors: Vec<ApiErrorEntry>,
    },
    /// The call path raised a transport or API-level exception
    ApiException {
        /// Exception message
        message: String,
    },
    /// Any other error raised while building or submitting the call
    Unexpected {
        /// Error message
        message: String,
    },
}

impl FailureDetail {
    /// Short category label used in log lines
    pub fn category(&self) -> &'static str {
        match self {
            FailureDetail::Declined { .. } => "API errors",
            FailureDetail::ApiException { .. } => "API Exception",
            FailureDetail::Unexpected { .. } => "Unexpected Error",
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureDetail::Declined { errors } => {
                let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Errors: {}", joined.join("; "))
            }
            FailureDetail::ApiException { message } | FailureDetail::Unexpected { message } => {
                write!(f, "Error: {}, Message: {}", self.category(), message)
            }
        }
    }
}

/// The result of submitting one refund request
#[derive(Debug, Clone, PartialEq)]
pub enum RefundOutcome {
    /// The gateway confirmed the refund
    Success {
        /// Refund ID assigned by the API
        refund_id: String,
        /// Refund status reported by the API (e.g. `PENDING`, `COMPLETED`)
        status: String,
        /// Refunded amount in major currency units
        amount: Decimal,
        /// Currency code reported by the API
        currency: String,
        /// Creation timestamp reported by the API (RFC 3339)
        created_at: String,
    },
    /// The refund was not applied
    Failure {
        /// Payment ID the refund targeted
        payment_id: String,
        /// Requested amount in major currency units
        amount: Decimal,
        /// What went wrong
        detail: FailureDetail,
    },
}

impl RefundOutcome {
    /// Whether this outcome counts toward the `successful` counter
    pub fn is_success(&self) -> bool {
        matches!(self, RefundOutcome::Success { .. })
    }
}
