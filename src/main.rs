//! Bill Split Engine CLI
//!
//! Command-line interface for splitting a receipt across a group.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- request.json > breakdown.csv
//! cargo run -- --format json request.json > breakdown.json
//! cargo run -- --tip-mode even --discount-mode even request.json
//! cargo run -- --exclude-unassigned request.json
//! RUST_LOG=debug cargo run -- request.json
//! ```
//!
//! The program reads a JSON split request, calculates the per-person
//! breakdown and writes the report to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid request, reconciliation failure, etc.)

use bill_split_engine::cli;
use bill_split_engine::core::{unassigned_items, SplitEngine};
use bill_split_engine::io::read_split_request;
use bill_split_engine::output::create_writer;
use bill_split_engine::types::SplitError;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: cli::LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &cli::CliArgs) -> Result<(), SplitError> {
    let request = read_split_request(&args.input_file)?;
    let engine = SplitEngine::new(args.apply_overrides(request.options));

    let mut receipt = request.receipt;
    if args.exclude_unassigned {
        let unassigned: Vec<&str> = unassigned_items(&receipt, &request.assignments)
            .into_iter()
            .map(String::as_str)
            .collect();
        if !unassigned.is_empty() {
            warn!(items = ?unassigned, "excluding unassigned items from the split");
            receipt = receipt.without_items(&unassigned)?;
        }
    }

    let breakdown = engine.calculate(&receipt, &request.group, &request.assignments)?;
    info!(
        people = breakdown.person_totals.len(),
        total = breakdown.total_owed(),
        "calculated breakdown"
    );

    let mut output = std::io::stdout().lock();
    create_writer(args.format).write(&breakdown, &mut output)
}

fn main() {
    let args = cli::parse_args();
    init_tracing(args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
