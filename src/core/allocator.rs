//! Adjustment pool allocation
//!
//! Distributes the discount, tax, service fee and tip pools across the group,
//! each independently according to its configured mode:
//! - `proportional`: in proportion to each person's items subtotal
//! - `even`: equally across every person in the group
//!
//! Proportional allocation needs a positive total items subtotal. When it is
//! zero the pool falls back to an even split and the fallback is recorded in
//! the pool's audit record.

use crate::core::distribution::{distribute, even_weights};
use crate::types::{
    AllocationMode, Cents, Person, Pool, PoolAllocation, Receipt, SplitError, SplitOptions,
};
use tracing::{debug, warn};

/// Allocation order of the pools
pub const POOLS: [Pool; 4] = [Pool::Discount, Pool::Tax, Pool::ServiceFee, Pool::Tip];

/// Per-person shares of every pool, indexed by group position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolShares {
    pub discount: Vec<Cents>,
    pub tax: Vec<Cents>,
    pub fee: Vec<Cents>,
    pub tip: Vec<Cents>,

    /// One audit record per pool, in [`POOLS`] order
    pub audit: Vec<PoolAllocation>,
}

/// The amount a receipt carries for a pool
pub fn pool_amount(receipt: &Receipt, pool: Pool) -> Cents {
    match pool {
        Pool::Discount => receipt.discount,
        Pool::Tax => receipt.tax,
        Pool::ServiceFee => receipt.service_fee,
        Pool::Tip => receipt.tip,
    }
}

/// Allocate every pool on the receipt
///
/// # Arguments
///
/// * `receipt` - Source of the pool amounts
/// * `people` - The group, in declaration order
/// * `subtotals` - Items subtotal per person, same order as `people`
/// * `options` - Allocation mode per pool
///
/// # Errors
///
/// Returns an error if:
/// - A person's discount share exceeds their items subtotal (`NegativeTotal`)
/// - Weight arithmetic overflows
pub fn allocate(
    receipt: &Receipt,
    people: &[Person],
    subtotals: &[Cents],
    options: &SplitOptions,
) -> Result<PoolShares, SplitError> {
    let mut discount = Vec::new();
    let mut tax = Vec::new();
    let mut fee = Vec::new();
    let mut tip = Vec::new();
    let mut audit = Vec::with_capacity(POOLS.len());

    for pool in POOLS {
        let (shares, record) = allocate_pool(
            pool,
            pool_amount(receipt, pool),
            options.mode_for(pool),
            subtotals,
        )?;

        match pool {
            Pool::Discount => discount = shares,
            Pool::Tax => tax = shares,
            Pool::ServiceFee => fee = shares,
            Pool::Tip => tip = shares,
        }
        audit.push(record);
    }

    for ((person, subtotal), discount_share) in people.iter().zip(subtotals).zip(&discount) {
        if discount_share > subtotal {
            return Err(SplitError::negative_total(&person.id, *subtotal, *discount_share));
        }
    }

    Ok(PoolShares {
        discount,
        tax,
        fee,
        tip,
        audit,
    })
}

/// Allocate one pool
///
/// Returns the per-person shares and the pool's audit record.
pub fn allocate_pool(
    pool: Pool,
    amount: Cents,
    requested: AllocationMode,
    subtotals: &[Cents],
) -> Result<(Vec<Cents>, PoolAllocation), SplitError> {
    if amount == 0 {
        return Ok((
            vec![0; subtotals.len()],
            PoolAllocation {
                pool,
                requested,
                applied: requested,
                amount,
                residual_units: 0,
            },
        ));
    }

    let total_subtotal: Cents = subtotals.iter().sum();

    let applied = match requested {
        AllocationMode::Proportional if total_subtotal > 0 => AllocationMode::Proportional,
        AllocationMode::Proportional => {
            warn!(
                pool = %pool,
                amount,
                "no positive items subtotal, falling back to even split"
            );
            AllocationMode::Even
        }
        AllocationMode::Even => AllocationMode::Even,
    };

    let weights = match applied {
        AllocationMode::Proportional => subtotals.iter().map(|&s| s.max(0) as u128).collect(),
        AllocationMode::Even => even_weights(subtotals.len()),
    };

    let distribution = distribute(amount, &weights, &pool.to_string())?;

    debug!(
        pool = %pool,
        mode = %applied,
        amount,
        residual_units = distribution.residual_units,
        "allocated pool"
    );

    Ok((
        distribution.amounts,
        PoolAllocation {
            pool,
            requested,
            applied,
            amount,
            residual_units: distribution.residual_units,
        },
    ))
}
