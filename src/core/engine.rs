//! Split calculation engine
//!
//! This module provides the SplitEngine that turns one receipt, group and
//! assignment set into a Breakdown by running the pipeline stages in order:
//!
//! 1. Validation of referential integrity and amounts
//! 2. Per-item share resolution into items subtotals
//! 3. Adjustment pool allocation (discount, tax, service fee, tip)
//! 4. Reconciliation against the receipt total
//!
//! The engine holds no state between calculations. Identical inputs always
//! produce identical breakdowns.

use crate::core::aggregator::SubtotalLedger;
use crate::core::allocator::{allocate, PoolShares};
use crate::core::reconciler::{reconcile, ReconciledTotals};
use crate::core::share_resolver::resolve_item;
use crate::core::validation::validate;
use crate::types::{
    Assignment, Breakdown, Cents, Group, PersonTotal, Receipt, SplitError, SplitOptions,
};
use tracing::{debug, warn};

/// Split calculation engine
///
/// Carries the allocation options; every call to [`SplitEngine::calculate`]
/// is independent.
#[derive(Debug, Clone, Default)]
pub struct SplitEngine {
    options: SplitOptions,
}

impl SplitEngine {
    /// Create a new SplitEngine with the given options
    pub fn new(options: SplitOptions) -> Self {
        SplitEngine { options }
    }

    /// Calculate the per-person breakdown for one receipt
    ///
    /// # Arguments
    ///
    /// * `receipt` - Fully parsed receipt; its `total` is authoritative
    /// * `group` - People splitting the bill, in the order residual units
    ///   are handed out
    /// * `assignments` - Who shares which item
    ///
    /// # Returns
    ///
    /// * `Ok(Breakdown)` whose per-person totals add up to `receipt.total`
    /// * `Err(SplitError)` if any stage fails; no partial result is returned
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input fails validation (unknown references, unassigned items, ...)
    /// - A share is malformed (quantity mismatch, non-positive weight)
    /// - A discount share exceeds a person's items subtotal
    /// - The reconciliation difference exceeds the configured tolerance
    /// - Any checked arithmetic overflows
    pub fn calculate(
        &self,
        receipt: &Receipt,
        group: &Group,
        assignments: &[Assignment],
    ) -> Result<Breakdown, SplitError> {
        let validated = validate(receipt, group, assignments)?;
        let tolerance = self.tolerance(group)?;

        if let Some(stated) = receipt.subtotal {
            if stated != validated.line_total_sum {
                warn!(
                    stated_subtotal = stated,
                    items_subtotal = validated.line_total_sum,
                    "stated subtotal does not match item line totals"
                );
            }
        }

        debug!(
            items = validated.items.len(),
            people = validated.people.len(),
            items_subtotal = validated.line_total_sum,
            "validated split request"
        );

        let mut ledger = SubtotalLedger::new(group.len());
        for assigned in &validated.items {
            let shares = resolve_item(assigned)?;
            ledger.record(assigned, &shares)?;
        }
        debug!(subtotals = ?ledger.subtotals(), "resolved item shares");

        let pools = allocate(receipt, &group.people, ledger.subtotals(), &self.options)?;
        let (subtotals, details) = ledger.into_parts();

        let pre_totals = pre_reconciliation_totals(&subtotals, &pools)?;
        let ReconciledTotals {
            adjustments,
            reconciliation,
        } = reconcile(receipt.total, &pre_totals, tolerance)?;

        let person_totals = group
            .people
            .iter()
            .zip(details)
            .enumerate()
            .map(|(i, (person, item_details))| PersonTotal {
                person_id: person.id.clone(),
                name: person.name.clone(),
                items_subtotal: subtotals[i],
                discount_share: pools.discount[i],
                tax_share: pools.tax[i],
                fee_share: pools.fee[i],
                tip_share: pools.tip[i],
                reconciliation_adjustment: adjustments[i],
                total_owed: pre_totals[i] + adjustments[i],
                item_details,
            })
            .collect();

        Ok(Breakdown {
            merchant_name: receipt.merchant_name.clone(),
            currency: receipt.currency.clone(),
            person_totals,
            pools: pools.audit,
            reconciliation,
        })
    }

    /// Reconciliation tolerance: `max_residual`, or one unit per person
    fn tolerance(&self, group: &Group) -> Result<Cents, SplitError> {
        match self.options.max_residual {
            Some(max) if max < 0 => Err(SplitError::negative_amount("options.max_residual", max)),
            Some(max) => Ok(max),
            None => Ok(group.len() as Cents),
        }
    }
}

/// Calculate a breakdown in one call
///
/// Shorthand for `SplitEngine::new(options.clone()).calculate(...)`.
pub fn calculate(
    receipt: &Receipt,
    group: &Group,
    assignments: &[Assignment],
    options: &SplitOptions,
) -> Result<Breakdown, SplitError> {
    SplitEngine::new(options.clone()).calculate(receipt, group, assignments)
}

/// `items_subtotal - discount + tax + fee + tip` for each person
fn pre_reconciliation_totals(
    subtotals: &[Cents],
    pools: &PoolShares,
) -> Result<Vec<Cents>, SplitError> {
    subtotals
        .iter()
        .enumerate()
        .map(|(i, &subtotal)| {
            subtotal
                .checked_sub(pools.discount[i])
                .and_then(|t| t.checked_add(pools.tax[i]))
                .and_then(|t| t.checked_add(pools.fee[i]))
                .and_then(|t| t.checked_add(pools.tip[i]))
                .ok_or_else(|| SplitError::arithmetic_overflow("person total"))
        })
        .collect()
}
