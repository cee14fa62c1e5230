//! Breakdown types produced by the engine
//!
//! A `Breakdown` is created fresh for every calculation and is never
//! mutated after it is returned.

use super::assignment::SplitMode;
use super::group::PersonId;
use super::money::Cents;
use super::options::{AllocationMode, Pool};
use super::receipt::ItemId;
use serde::Serialize;

/// One person's portion of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemShare {
    pub item_id: ItemId,
    pub item_name: String,
    pub line_total: Cents,
    pub amount: Cents,
    pub mode: SplitMode,
}

/// What one person owes
///
/// `total_owed = items_subtotal - discount_share + tax_share + fee_share
/// + tip_share + reconciliation_adjustment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonTotal {
    pub person_id: PersonId,
    pub name: String,
    pub items_subtotal: Cents,
    pub discount_share: Cents,
    pub tax_share: Cents,
    pub fee_share: Cents,
    pub tip_share: Cents,

    /// Units added (or removed) by reconciliation
    pub reconciliation_adjustment: Cents,

    pub total_owed: Cents,

    /// Item portions in receipt order
    pub item_details: Vec<ItemShare>,
}

/// Audit record for one adjustment pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolAllocation {
    pub pool: Pool,
    pub requested: AllocationMode,

    /// Differs from `requested` when proportional allocation fell back to
    /// an even split because nobody had a positive items subtotal
    pub applied: AllocationMode,

    pub amount: Cents,

    /// Units left over after floor division and handed out one at a time
    pub residual_units: Cents,
}

impl PoolAllocation {
    pub fn fell_back(&self) -> bool {
        self.requested != self.applied
    }
}

/// Result of forcing the per-person totals onto the receipt total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// The receipt's stated total
    pub target_total: Cents,

    /// Sum of per-person totals before correction
    pub calculated_total: Cents,

    /// `target_total - calculated_total`
    pub difference: Cents,

    /// Number of single-unit corrections applied
    pub units_corrected: Cents,
}

/// Per-person result of one split calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub merchant_name: Option<String>,
    pub currency: String,

    /// One entry per person, in group order
    pub person_totals: Vec<PersonTotal>,

    /// One entry per pool: discount, tax, service fee, tip
    pub pools: Vec<PoolAllocation>,

    pub reconciliation: Reconciliation,
}

impl Breakdown {
    /// Sum of every person's total owed
    pub fn total_owed(&self) -> Cents {
        self.person_totals.iter().map(|p| p.total_owed).sum()
    }

    /// Look up one person's totals
    pub fn person(&self, person_id: &str) -> Option<&PersonTotal> {
        self.person_totals.iter().find(|p| p.person_id == person_id)
    }

    /// Pools whose proportional allocation degraded to an even split
    pub fn fallbacks(&self) -> impl Iterator<Item = Pool> + '_ {
        self.pools.iter().filter(|p| p.fell_back()).map(|p| p.pool)
    }
}
