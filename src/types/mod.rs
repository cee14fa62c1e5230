//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Minimum currency units and decimal conversion
//! - `receipt`: Receipt and line items
//! - `group`: People splitting the bill
//! - `assignment`: Item-to-people shares and split modes
//! - `options`: Pool allocation modes
//! - `breakdown`: Per-person output of a calculation
//! - `error`: Error types for the split engine

pub mod assignment;
pub mod breakdown;
pub mod error;
pub mod group;
pub mod money;
pub mod options;
pub mod receipt;

pub use assignment::{Assignment, Share, Split, SplitMode};
pub use breakdown::{Breakdown, ItemShare, PersonTotal, PoolAllocation, Reconciliation};
pub use error::SplitError;
pub use group::{Group, Person, PersonId};
pub use money::{format_cents, to_cents, Cents, MINOR_UNIT_SCALE};
pub use options::{AllocationMode, Pool, SplitOptions};
pub use receipt::{Item, ItemId, Receipt};
