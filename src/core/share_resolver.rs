//! Per-item share resolution
//!
//! Turns one assigned item into exact per-person amounts. Each split mode
//! only decides the integer weights; the amounts themselves always come
//! from [`distribute`], so an item's shares add up to its line total.

use crate::core::distribution::{distribute, even_weights};
use crate::core::validation::AssignedItem;
use crate::types::{Cents, Split, SplitError, SplitMode};
use rust_decimal::Decimal;

/// One person's resolved portion of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedShare {
    /// Index into the group's people
    pub person: usize,
    pub amount: Cents,
}

/// Resolve an item's line total into per-person amounts
///
/// Shares are returned in declaration order.
///
/// # Errors
///
/// Returns an error if:
/// - A claimed quantity or fraction weight is not positive
/// - Claimed quantities do not add up to the item's quantity
/// - Shares on the item use different split modes
/// - Weight scaling overflows
pub fn resolve_item(assigned: &AssignedItem<'_>) -> Result<Vec<ResolvedShare>, SplitError> {
    let weights = match assigned.mode {
        SplitMode::Even => even_weights(assigned.sharers.len()),
        SplitMode::Quantity => quantity_weights(assigned)?,
        SplitMode::Fraction => fraction_weights(assigned)?,
    };

    let distribution = distribute(assigned.line_total, &weights, &assigned.item.id)?;

    Ok(assigned
        .sharers
        .iter()
        .zip(distribution.amounts)
        .map(|(sharer, amount)| ResolvedShare {
            person: sharer.person,
            amount,
        })
        .collect())
}

fn quantity_weights(assigned: &AssignedItem<'_>) -> Result<Vec<u128>, SplitError> {
    let item_id = assigned.item.id.as_str();
    let mut weights = Vec::with_capacity(assigned.sharers.len());
    let mut claimed: u64 = 0;

    for sharer in &assigned.sharers {
        let quantity = match sharer.share.split {
            Split::Quantity { quantity } => quantity,
            _ => return Err(SplitError::mixed_split_modes(item_id)),
        };

        if quantity == 0 {
            return Err(SplitError::non_positive_share(
                item_id,
                &sharer.share.person_id,
            ));
        }

        claimed += u64::from(quantity);
        weights.push(u128::from(quantity));
    }

    if claimed != u64::from(assigned.item.quantity) {
        return Err(SplitError::quantity_mismatch(
            item_id,
            claimed,
            assigned.item.quantity,
        ));
    }

    Ok(weights)
}

/// Scale decimal weights to integers sharing one scale
///
/// `0.5, 0.25, 0.25` become `50, 25, 25`; the ratios are preserved exactly.
fn fraction_weights(assigned: &AssignedItem<'_>) -> Result<Vec<u128>, SplitError> {
    let item_id = assigned.item.id.as_str();
    let mut decimals: Vec<Decimal> = Vec::with_capacity(assigned.sharers.len());

    for sharer in &assigned.sharers {
        let weight = match sharer.share.split {
            Split::Fraction { weight } => weight,
            _ => return Err(SplitError::mixed_split_modes(item_id)),
        };

        if weight <= Decimal::ZERO {
            return Err(SplitError::non_positive_share(
                item_id,
                &sharer.share.person_id,
            ));
        }

        decimals.push(weight.normalize());
    }

    let max_scale = decimals.iter().map(|d| d.scale()).max().unwrap_or(0);

    decimals
        .iter()
        .map(|d| {
            let factor = 10_u128
                .checked_pow(max_scale - d.scale())
                .ok_or_else(|| SplitError::arithmetic_overflow(item_id))?;
            (d.mantissa() as u128)
                .checked_mul(factor)
                .ok_or_else(|| SplitError::arithmetic_overflow(item_id))
        })
        .collect()
}
