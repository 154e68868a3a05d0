//! CSV format handling for refund input files
//!
//! This module centralizes the format-level concerns of the input loader:
//! - Delimiter auto-detection from a file sample
//! - Header validation (required columns, remediation hints)
//! - Conversion of one raw record into a validated RefundRequest
//!
//! All functions are pure (no I/O) for easy testing. The loader in
//! [`crate::io::loader`] owns the file handling and calls into here.

use crate::types::{RefundError, RefundRequest};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Number of bytes sampled from the start of the file for delimiter detection
pub const SNIFF_SAMPLE_BYTES: usize = 1024;

/// Delimiters considered during auto-detection
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Required header columns, exact case
const REQUIRED_COLUMNS: [&str; 2] = ["payment_id", "amount"];

/// Detect the field delimiter from a sample of the file content
///
/// Counts candidate delimiters (comma, semicolon, tab, pipe) on the first
/// non-empty line of the sample and picks the most frequent one. Falls back
/// to comma when the sample contains none of the candidates, so a
/// single-column file still parses.
pub fn detect_delimiter(sample: &str) -> u8 {
    let first_line = sample
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in DELIMITER_CANDIDATES {
        let count = first_line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Positions of the required columns within the header row
///
/// Extra columns are ignored; when a name appears twice, the first
/// occurrence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderIndex {
    /// Field index of the `payment_id` column
    pub payment_id: usize,
    /// Field index of the `amount` column
    pub amount: usize,
}

/// Validate the header row and locate the required columns
///
/// Column matching is exact case: `Payment_ID` does not satisfy
/// `payment_id`. Extra columns in any order are tolerated.
///
/// # Errors
///
/// Returns [`RefundError::MissingColumns`] naming both the columns found and
/// the columns missing when either required column is absent. This is fatal:
/// the loader aborts before any refund call is attempted.
pub fn validate_header(headers: &StringRecord) -> Result<HeaderIndex, RefundError> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let payment_id = find("payment_id");
    let amount = find("amount");

    match (payment_id, amount) {
        (Some(payment_id), Some(amount)) => Ok(HeaderIndex { payment_id, amount }),
        _ => {
            let found: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
            let missing: Vec<String> = REQUIRED_COLUMNS
                .into_iter()
                .filter(|&name| find(name).is_none())
                .map(String::from)
                .collect();
            Err(RefundError::missing_columns(found, missing))
        }
    }
}

/// Why a row was excluded from processing
///
/// Skips are recoverable: the loader records a warning and continues with
/// the next row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSkip {
    /// payment_id field is empty after trimming
    EmptyPaymentId,
    /// amount field did not parse as a decimal number
    InvalidAmountFormat(String),
    /// amount parsed but is zero or negative
    NonPositiveAmount(Decimal),
}

impl fmt::Display for RowSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSkip::EmptyPaymentId => write!(f, "Empty payment_id, skipping"),
            RowSkip::InvalidAmountFormat(raw) => {
                write!(f, "Invalid amount format '{}', skipping", raw)
            }
            RowSkip::NonPositiveAmount(amount) => {
                write!(f, "Invalid amount {}, skipping", amount)
            }
        }
    }
}

/// Convert one raw record into a validated RefundRequest
///
/// Both fields are trimmed before validation. A field missing entirely from
/// a short record is treated as empty. `row_number` is the physical line in
/// the file (first data row is 2, after the header).
pub fn convert_row(
    record: &StringRecord,
    index: &HeaderIndex,
    row_number: u64,
) -> Result<RefundRequest, RowSkip> {
    let payment_id = record.get(index.payment_id).unwrap_or("").trim();
    let amount_raw = record.get(index.amount).unwrap_or("").trim();

    if payment_id.is_empty() {
        return Err(RowSkip::EmptyPaymentId);
    }

    let amount = Decimal::from_str(amount_raw)
        .map_err(|_| RowSkip::InvalidAmountFormat(amount_raw.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(RowSkip::NonPositiveAmount(amount));
    }

    Ok(RefundRequest {
        payment_id: payment_id.to_string(),
        amount,
        source_row: row_number,
    })
}

/// Remediation hints logged alongside a header validation failure
pub fn header_hints() -> [&'static str; 4] {
    [
        "Common issues:",
        "- Extra empty lines at the beginning of the file",
        "- Incorrect column names (case sensitive)",
        "- Missing header row",
    ]
}
