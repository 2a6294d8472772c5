use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod driver;
mod progress;

use crate::cli::Cli;
use linnaea_core::LinnaeaError;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with LINNAEA_LOG environment variable support;
    // RUST_LOG takes precedence when set
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::try_from_default_env().unwrap()
    } else {
        let level = std::env::var("LINNAEA_LOG").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level)
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = driver::run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<LinnaeaError>() {
            Some(LinnaeaError::Configuration(_)) => 2,
            Some(LinnaeaError::Io(_)) => 3,
            Some(LinnaeaError::Parse(_)) => 4,
            Some(LinnaeaError::Index(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}
