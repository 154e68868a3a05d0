use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Process Square refunds from a CSV file
#[derive(Parser, Debug)]
#[command(name = "square-refund-runner")]
#[command(about = "Process Square refunds from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file containing payment_id and amount columns
    #[arg(value_name = "CSV", help = "Path to the input CSV file")]
    pub csv_file: PathBuf,

    /// Square API access token
    #[arg(
        long = "token",
        value_name = "TOKEN",
        help = "Square API access token"
    )]
    pub token: String,

    /// Square API environment to target
    #[arg(
        long = "environment",
        value_name = "ENV",
        default_value = "sandbox",
        help = "Square API environment: 'sandbox' or 'production'"
    )]
    pub environment: Environment,

    /// Currency code attached to every refund
    ///
    /// The currency is never inferred from the input file; every refund in
    /// one run uses this single configured code.
    #[arg(
        long = "currency",
        value_name = "CODE",
        default_value = "USD",
        help = "ISO currency code for all refunds (default: USD)"
    )]
    pub currency: String,

    /// Reason string attached to every refund
    #[arg(
        long = "reason",
        value_name = "TEXT",
        default_value = "Refund processed via batch script",
        help = "Reason recorded with each refund"
    )]
    pub reason: String,

    /// Directory where the timestamped run log file is created
    #[arg(
        long = "log-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory for the run log file (default: current directory)"
    )]
    pub log_dir: PathBuf,
}

/// Square API environments
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Base URL for the Square API in this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://connect.squareupsandbox.com",
            Environment::Production => "https://connect.squareup.com",
        }
    }

    /// Lowercase name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}
