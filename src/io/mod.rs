//! I/O module
//!
//! Input handling for refund CSV files, split the same way the format and
//! the file handling split:
//! - `csv_format`: pure format logic (delimiter sniffing, header validation,
//!   row conversion)
//! - `loader`: file access and the skip-with-warning loading loop

pub mod csv_format;
pub mod loader;

pub use loader::load_refund_requests;
