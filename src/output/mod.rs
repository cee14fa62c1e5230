//! Report output module
//!
//! Defines the BreakdownWriter trait so the report format can be selected at
//! runtime from the command line. Each writer delegates to a formatter in
//! the `io` module.

use crate::cli::OutputFormat;
use crate::io::{write_breakdown_csv, write_breakdown_json};
use crate::types::{Breakdown, SplitError};
use std::io::Write;

/// Breakdown report writer
pub trait BreakdownWriter: Send + Sync {
    /// Write one breakdown to `output`
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the report cannot be written.
    fn write(&self, breakdown: &Breakdown, output: &mut dyn Write) -> Result<(), SplitError>;
}

/// One CSV row per person
pub struct CsvWriter;

impl BreakdownWriter for CsvWriter {
    fn write(&self, breakdown: &Breakdown, output: &mut dyn Write) -> Result<(), SplitError> {
        write_breakdown_csv(breakdown, output)
    }
}

/// The full breakdown as pretty-printed JSON
pub struct JsonWriter;

impl BreakdownWriter for JsonWriter {
    fn write(&self, breakdown: &Breakdown, output: &mut dyn Write) -> Result<(), SplitError> {
        write_breakdown_json(breakdown, output)
    }
}

/// Create a report writer for the requested format
pub fn create_writer(format: OutputFormat) -> Box<dyn BreakdownWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvWriter),
        OutputFormat::Json => Box::new(JsonWriter),
    }
}
