//! Error types for the refund runner
//!
//! This module defines the fatal, load-time error taxonomy. Everything here
//! aborts the run before any refund call is attempted.
//!
//! Per-row problems are deliberately NOT represented here: a malformed input
//! row is skipped with a warning during loading, and a failed refund call is
//! captured as a [`RefundOutcome`](crate::types::RefundOutcome) by the runner.
//! Only errors that make the whole run impossible flow through `RefundError`.

use thiserror::Error;

/// Fatal error for the refund runner
///
/// Each variant carries enough context for the operator to diagnose the
/// problem from the log alone. All variants terminate the run with a
/// non-zero exit code before any external call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefundError {
    /// Input file not found at the specified path
    #[error("CSV file not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading the input file or creating the log file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the underlying I/O failure
        message: String,
    },

    /// Required header columns are missing from the input file
    ///
    /// The loader requires `payment_id` and `amount` (exact case) to be
    /// present in the header row. Any other columns are ignored.
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Column names actually present in the header row
        found: Vec<String>,
        /// Required column names that were not present
        missing: Vec<String>,
    },

    /// Structurally invalid CSV content (bad quoting, invalid UTF-8)
    ///
    /// Unlike a merely malformed row, this means the file itself cannot be
    /// read reliably past this point, so the load is aborted.
    #[error("CSV read error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if known)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The HTTP client for the refund gateway could not be constructed
    #[error("Failed to initialize refund gateway: {message}")]
    GatewayInit {
        /// Description of the construction failure
        message: String,
    },
}

impl From<std::io::Error> for RefundError {
    fn from(error: std::io::Error) -> Self {
        RefundError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for RefundError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RefundError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl RefundError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        RefundError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a MissingColumns error
    pub fn missing_columns(found: Vec<String>, missing: Vec<String>) -> Self {
        RefundError::MissingColumns { found, missing }
    }
}
