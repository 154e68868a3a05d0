//! Run log sink
//!
//! A [`RunLog`] is the logging context for one run invocation: a timestamped
//! log file plus mirroring to the console through the `log` facade. It is
//! constructed explicitly in `main` and passed to the loader and runner, so
//! repeated invocations in one process (notably in tests) never share hidden
//! global sink state.
//!
//! File lines match the original operator-facing format:
//! `YYYY-MM-DD HH:MM:SS - LEVEL - message`.

use crate::types::RefundError;
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Per-run log sink with an optional file mirror
///
/// Console output goes through the `log` facade (backed by `env_logger` in
/// the binary); file output is best-effort so a full disk never aborts a
/// refund run mid-flight.
pub struct RunLog {
    file: Option<BufWriter<File>>,
}

impl RunLog {
    /// Create a run log with a fresh timestamped file in `dir`
    ///
    /// The file is named `square_refunds_<YYYYmmdd_HHMMSS>.log`. Returns the
    /// sink together with the path of the created file so it can be reported
    /// to the operator.
    ///
    /// # Errors
    ///
    /// Returns [`RefundError::Io`] if the file cannot be created.
    pub fn create(dir: &Path) -> Result<(Self, PathBuf), RefundError> {
        let filename = format!(
            "square_refunds_{}.log",
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(filename);
        let file = File::create(&path)?;

        Ok((
            RunLog {
                file: Some(BufWriter::new(file)),
            },
            path,
        ))
    }

    /// Create a run log with no file mirror (console only)
    pub fn without_file() -> Self {
        RunLog { file: None }
    }

    /// Log an informational line
    pub fn info(&mut self, message: &str) {
        log::info!("{}", message);
        self.write_line("INFO", message);
    }

    /// Log a warning line
    pub fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
        self.write_line("WARNING", message);
    }

    /// Log an error line
    pub fn error(&mut self, message: &str) {
        log::error!("{}", message);
        self.write_line("ERROR", message);
    }

    fn write_line(&mut self, level: &str, message: &str) {
        if let Some(file) = &mut self.file {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            // Best-effort: a failed log write must not abort the run
            let _ = writeln!(file, "{} - {} - {}", timestamp, level, message);
            let _ = file.flush();
        }
    }
}
