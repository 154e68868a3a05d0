//! Input loader for refund CSV files
//!
//! Reads a delimited file into an ordered list of validated
//! [`RefundRequest`]s. The loader fails fast on anything structural (missing
//! file, missing required columns, unreadable content) and skips individual
//! malformed rows with a warning so one bad row never sinks the batch.
//!
//! # Delimiter detection
//!
//! The delimiter is sniffed from the first 1KB of the file rather than
//! assumed to be a comma, so exports that use semicolons, tabs, or pipes
//! load without reconfiguration. The file handle is rewound after sampling
//! and the whole file is then streamed record by record.
//!
//! # Row numbering
//!
//! Diagnostics number rows by physical file line: the header is line 1, so
//! the first data row is row 2.

use crate::io::csv_format::{
    convert_row, detect_delimiter, header_hints, validate_header, SNIFF_SAMPLE_BYTES,
};
use crate::logging::RunLog;
use crate::types::{RefundError, RefundRequest};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Load and validate refund requests from a delimited file
///
/// Returns the requests in file order. Duplicate payment IDs are kept; no
/// deduplication or sorting is performed.
///
/// # Errors
///
/// * [`RefundError::FileNotFound`] when the path does not exist
/// * [`RefundError::Io`] for any other read failure
/// * [`RefundError::MissingColumns`] when the header lacks `payment_id` or
///   `amount` (exact case)
/// * [`RefundError::Csv`] when a record is structurally unreadable
///
/// All of these abort before any refund call is attempted.
pub fn load_refund_requests(
    path: &Path,
    log: &mut RunLog,
) -> Result<Vec<RefundRequest>, RefundError> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            let error = RefundError::file_not_found(&path.display().to_string());
            log.error(&error.to_string());
            error
        } else {
            log.error(&format!("Error reading CSV file: {}", e));
            RefundError::from(e)
        }
    })?;

    // Sniff the delimiter from the head of the file, then rewind so the CSV
    // reader sees the header row again
    let mut sample = vec![0u8; SNIFF_SAMPLE_BYTES];
    let sampled = file
        .read(&mut sample)
        .map_err(|e| log_fatal(log, e.into()))?;
    let delimiter = detect_delimiter(&String::from_utf8_lossy(&sample[..sampled]));
    file.seek(SeekFrom::Start(0))
        .map_err(|e| log_fatal(log, e.into()))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| log_fatal(log, e.into()))?
        .clone();
    let index = match validate_header(&headers) {
        Ok(index) => index,
        Err(error) => {
            let found: Vec<&str> = headers.iter().collect();
            log.error(&format!("CSV file format issue. Found columns: {:?}", found));
            log.error("Expected columns: payment_id, amount");
            for hint in header_hints() {
                log.error(hint);
            }
            return Err(error);
        }
    };

    let found: Vec<&str> = headers.iter().collect();
    log.info(&format!("CSV columns found: {:?}", found));

    let mut requests = Vec::new();
    for (i, result) in reader.records().enumerate() {
        // Header is physical line 1
        let row_number = i as u64 + 2;
        let record = result.map_err(|e| log_fatal(log, e.into()))?;

        match convert_row(&record, &index, row_number) {
            Ok(request) => requests.push(request),
            Err(skip) => log.warn(&format!("Row {}: {}", row_number, skip)),
        }
    }

    log.info(&format!(
        "Successfully read {} valid refund entries from CSV",
        requests.len()
    ));

    Ok(requests)
}

/// Record a fatal load error in the run log before it propagates
///
/// Fatal errors terminate the run, so this is the last chance to get them
/// into the durable log file for manual reconciliation.
fn log_fatal(log: &mut RunLog, error: RefundError) -> RefundError {
    log.error(&format!("Error reading CSV file: {}", error));
    error
}
