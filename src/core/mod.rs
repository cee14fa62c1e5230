//! Core business logic module
//!
//! This module contains the split calculation pipeline:
//! - `validation` - Referential integrity and amount checks
//! - `distribution` - Exact integer split of an amount over weights
//! - `share_resolver` - Per-item share resolution (even, quantity, fraction)
//! - `aggregator` - Per-person items subtotals
//! - `allocator` - Discount, tax, service fee and tip pools
//! - `reconciler` - Forcing totals onto the receipt total
//! - `engine` - Orchestration of the stages above

pub mod aggregator;
pub mod allocator;
pub mod distribution;
pub mod engine;
pub mod reconciler;
pub mod share_resolver;
pub mod validation;

pub use allocator::{allocate, PoolShares, POOLS};
pub use distribution::{distribute, Distribution};
pub use engine::{calculate, SplitEngine};
pub use reconciler::{reconcile, ReconciledTotals};
pub use validation::{unassigned_items, validate, ValidatedSplit};
