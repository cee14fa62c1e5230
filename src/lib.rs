//! Bill Split Engine Library
//! # Overview
//!
//! This library turns a restaurant receipt, a group of people and a set of
//! item assignments into a per-person breakdown that adds up exactly to the
//! receipt total, in integer minimum currency units.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Receipt, Group, Assignment, Breakdown, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::validation`] - Referential integrity checks before any arithmetic
//!   - [`core::share_resolver`] - Per-item shares (even, quantity, fraction)
//!   - [`core::allocator`] - Discount, tax, service fee and tip pools
//!   - [`core::reconciler`] - Forcing the totals onto the receipt total
//!   - [`core::engine`] - Pipeline orchestration
//! - [`io`] - JSON request reading and report formatting
//! - [`output`] - Report writers selected at runtime
//!
//! # Split Modes
//!
//! Each item is split with one of three modes:
//!
//! - **Even**: equal portions among everyone sharing the item
//! - **Quantity**: portions by claimed units (claims must add up to the item quantity)
//! - **Fraction**: portions by explicit positive weights
//!
//! Each adjustment pool is allocated either **proportionally** to items
//! subtotals or **evenly** across the whole group.
//!
//! # Example
//!
//! ```
//! use bill_split_engine::{calculate, Assignment, Group, Item, Person, Receipt, SplitOptions};
//!
//! let mut receipt = Receipt::new(vec![Item::new("1", "Pizza", 1000, 1)], 1100);
//! receipt.tax = 100;
//! let group = Group::new(vec![
//!     Person::new("a", "Ann"),
//!     Person::new("b", "Ben"),
//!     Person::new("c", "Cy"),
//! ]);
//! let assignments = vec![Assignment::even("1", &["a", "b", "c"])];
//!
//! let breakdown = calculate(&receipt, &group, &assignments, &SplitOptions::default()).unwrap();
//! assert_eq!(breakdown.total_owed(), 1100);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod output;
pub mod types;

pub use core::{calculate, unassigned_items, SplitEngine};
pub use io::{read_split_request, write_breakdown_csv, write_breakdown_json, SplitRequest};
pub use types::{
    AllocationMode, Assignment, Breakdown, Cents, Group, Item, Person, PersonTotal, Receipt,
    Share, Split, SplitError, SplitMode, SplitOptions,
};
