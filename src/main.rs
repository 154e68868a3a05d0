//! Square Refund Runner CLI
//!
//! Command-line tool for processing batch refunds from a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- refunds.csv --token YOUR_ACCESS_TOKEN
//! cargo run -- refunds.csv --token YOUR_ACCESS_TOKEN --environment production
//! cargo run -- refunds.csv --token YOUR_ACCESS_TOKEN --currency USD --log-dir ./logs
//! ```
//!
//! The program reads `payment_id,amount` rows from the input CSV file, issues
//! one refund per validated row against the Square Refunds API, and writes a
//! timestamped run log next to the console output.
//!
//! # CSV Format
//!
//! ```text
//! payment_id,amount
//! PAYMENT_ID_1,10.50
//! PAYMENT_ID_2,25.00
//! ```
//!
//! # Exit Codes
//!
//! - 0: every attempted refund succeeded (a file with zero valid rows also
//!   exits 0: nothing was attempted, nothing failed)
//! - 1: at least one refund failed, the input could not be loaded, or the
//!   run was interrupted

use square_refund_runner::cli;
use square_refund_runner::{
    load_refund_requests, RefundRunner, RunConfig, RunLog, SquareGateway,
};
use std::process;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Console half of the run log; the file half is owned by RunLog
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let (mut log, log_path) = match RunLog::create(&args.log_dir) {
        Ok(created) => created,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            return 1;
        }
    };

    log.info(&format!(
        "Logging initialized. Log file: {}",
        log_path.display()
    ));
    log.info(&format!("Square environment: {}", args.environment.name()));
    log.info(&format!(
        "Starting refund processing from: {}",
        args.csv_file.display()
    ));

    // Load and validate the whole file before any refund is attempted
    let requests = match load_refund_requests(&args.csv_file, &mut log) {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            return 1;
        }
    };

    let gateway = match SquareGateway::new(args.token, args.environment) {
        Ok(gateway) => gateway,
        Err(e) => {
            log.error(&e.to_string());
            eprintln!("Fatal error: {}", e);
            return 1;
        }
    };

    let config = RunConfig {
        currency: args.currency,
        reason: args.reason,
    };
    let summary = RefundRunner::new(gateway, config).run(&requests, &mut log);

    if summary.failed > 0 {
        println!(
            "\nWarning: {} refunds failed. Check the log file for details.",
            summary.failed
        );
        1
    } else {
        println!(
            "\nSuccess: All {} refunds processed successfully.",
            summary.successful
        );
        0
    }
}
