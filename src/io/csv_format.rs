//! CSV report output for breakdowns
//!
//! One row per person, in group order, with columns:
//! `person_id, name, items_subtotal, discount, tax, service_fee, tip,
//! adjustment, total_owed`. Amounts are written with two decimal places.
//!
//! The discount column holds the magnitude subtracted from the person's
//! total, so `total_owed = items_subtotal - discount + tax + service_fee +
//! tip + adjustment` holds on every row.

use crate::types::{format_cents, Breakdown, SplitError};
use csv::Writer;
use std::io::Write;

/// Header row of the CSV report
pub const CSV_HEADER: [&str; 9] = [
    "person_id",
    "name",
    "items_subtotal",
    "discount",
    "tax",
    "service_fee",
    "tip",
    "adjustment",
    "total_owed",
];

/// Write a breakdown as a CSV report
///
/// # Arguments
///
/// * `breakdown` - The breakdown to write
/// * `output` - Destination writer
///
/// # Errors
///
/// Returns `IoError` if writing or flushing fails.
pub fn write_breakdown_csv(
    breakdown: &Breakdown,
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(CSV_HEADER)?;

    for person in &breakdown.person_totals {
        writer.write_record(&[
            person.person_id.clone(),
            person.name.clone(),
            format_cents(person.items_subtotal),
            format_cents(person.discount_share),
            format_cents(person.tax_share),
            format_cents(person.fee_share),
            format_cents(person.tip_share),
            format_cents(person.reconciliation_adjustment),
            format_cents(person.total_owed),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
