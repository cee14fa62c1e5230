//! JSON report output for breakdowns
//!
//! Writes the complete breakdown, including item details, pool audit
//! records and the reconciliation record. Amounts stay integer cents.

use crate::types::{Breakdown, SplitError};
use std::io::Write;

/// Write a breakdown as pretty-printed JSON followed by a newline
///
/// # Errors
///
/// Returns `IoError` if writing fails.
pub fn write_breakdown_json(
    breakdown: &Breakdown,
    output: &mut dyn Write,
) -> Result<(), SplitError> {
    serde_json::to_writer_pretty(&mut *output, breakdown)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AllocationMode, ItemShare, PersonTotal, Pool, PoolAllocation, Reconciliation, SplitMode,
    };
    use serde_json::Value;

    fn breakdown() -> Breakdown {
        Breakdown {
            merchant_name: Some("Luigi's".to_string()),
            currency: "USD".to_string(),
            person_totals: vec![PersonTotal {
                person_id: "a".to_string(),
                name: "Ann".to_string(),
                items_subtotal: 1000,
                discount_share: 0,
                tax_share: 0,
                fee_share: 300,
                tip_share: 0,
                reconciliation_adjustment: 0,
                total_owed: 1300,
                item_details: vec![ItemShare {
                    item_id: "1".to_string(),
                    item_name: "Pasta".to_string(),
                    line_total: 1000,
                    amount: 1000,
                    mode: SplitMode::Even,
                }],
            }],
            pools: vec![PoolAllocation {
                pool: Pool::ServiceFee,
                requested: AllocationMode::Proportional,
                applied: AllocationMode::Even,
                amount: 300,
                residual_units: 0,
            }],
            reconciliation: Reconciliation {
                target_total: 1300,
                calculated_total: 1300,
                difference: 0,
                units_corrected: 0,
            },
        }
    }

    #[test]
    fn test_write_breakdown_json() {
        let mut output = Vec::new();
        write_breakdown_json(&breakdown(), &mut output).unwrap();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["merchant_name"], "Luigi's");
        assert_eq!(value["person_totals"][0]["total_owed"], 1300);
        assert_eq!(value["person_totals"][0]["item_details"][0]["mode"], "even");
        assert_eq!(value["pools"][0]["pool"], "service_fee");
        assert_eq!(value["pools"][0]["applied"], "even");
        assert_eq!(value["reconciliation"]["target_total"], 1300);
        assert!(output.ends_with(b"}\n"));
    }
}
