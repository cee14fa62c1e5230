//! Reconciliation against the receipt total
//!
//! Forces the per-person totals to add up to the receipt's stated total by
//! moving single units, one person at a time in group order. A negative
//! correction skips anyone whose total has already reached zero.

use crate::types::{Cents, Reconciliation, SplitError};
use tracing::{debug, info};

/// Per-person corrections and the audit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledTotals {
    /// Units added to (or removed from) each person, in group order
    pub adjustments: Vec<Cents>,
    pub reconciliation: Reconciliation,
}

/// Reconcile pre-correction totals to `target`
///
/// # Arguments
///
/// * `target` - The receipt's authoritative total
/// * `totals` - Each person's total before correction, in group order
/// * `tolerance` - Largest absolute difference absorbed as rounding drift
///
/// # Errors
///
/// Returns `ReconciliationOutOfTolerance` if:
/// - `|target - sum(totals)|` exceeds `tolerance`
/// - A negative correction cannot be applied without pushing someone below
///   zero
pub fn reconcile(
    target: Cents,
    totals: &[Cents],
    tolerance: Cents,
) -> Result<ReconciledTotals, SplitError> {
    let calculated = totals
        .iter()
        .try_fold(0 as Cents, |acc, &t| acc.checked_add(t))
        .ok_or_else(|| SplitError::arithmetic_overflow("calculated total"))?;
    let difference = target
        .checked_sub(calculated)
        .ok_or_else(|| SplitError::arithmetic_overflow("reconciliation difference"))?;

    let out_of_tolerance = || SplitError::ReconciliationOutOfTolerance {
        target,
        calculated,
        difference,
        tolerance,
    };

    if difference.unsigned_abs() > tolerance.unsigned_abs() {
        return Err(out_of_tolerance());
    }

    let mut adjustments = vec![0; totals.len()];
    let step: Cents = difference.signum();
    let mut remaining = difference.unsigned_abs();
    let mut position = 0;
    // Consecutive people passed over without receiving a unit
    let mut skipped = 0;

    while remaining > 0 {
        if skipped == totals.len() {
            return Err(out_of_tolerance());
        }

        let current = totals[position] + adjustments[position];
        if step > 0 || current > 0 {
            adjustments[position] += step;
            remaining -= 1;
            skipped = 0;
        } else {
            skipped += 1;
        }

        position = (position + 1) % totals.len();
    }

    if difference != 0 {
        info!(
            target_total = target,
            calculated_total = calculated,
            difference,
            "reconciled per-person totals to receipt total"
        );
    } else {
        debug!(target_total = target, "per-person totals already match receipt total");
    }

    Ok(ReconciledTotals {
        adjustments,
        reconciliation: Reconciliation {
            target_total: target,
            calculated_total: calculated,
            difference,
            units_corrected: difference.abs(),
        },
    })
}
