//! Error types for the split engine
//!
//! This module defines all error types that can occur while reading a split
//! request and calculating a breakdown. Every variant carries enough context
//! (item, person, pool, amounts) for the caller to show an actionable message.
//!
//! # Error Categories
//!
//! - **I/O and Parse Errors**: request file missing or malformed
//! - **Amount Errors**: sub-cent precision, negative amounts, missing prices
//! - **Structural Errors**: unknown references, unassigned items, bad shares
//! - **Allocation Errors**: a discount that would push someone below zero
//! - **Reconciliation Errors**: residual too large to be rounding drift
//! - **Arithmetic Errors**: overflow in checked integer arithmetic
//!
//! None of these are recoverable inside the engine: a calculation either
//! returns a complete breakdown or one of these errors.

use super::money::Cents;
use thiserror::Error;

/// Main error type for the split engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// Request file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The request could not be parsed
    #[error(
        "Parse error{}: {message}",
        line.map(|l| format!(" at line {}", l)).unwrap_or_default()
    )]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Description of the parsing error
        message: String,
    },

    /// Amount cannot be represented exactly in minimum currency units
    #[error("Invalid amount '{value}' for {field}")]
    InvalidAmount {
        /// Field that carried the amount
        field: String,
        /// The offending value as supplied
        value: String,
    },

    /// Amount that must be non-negative is negative
    #[error("Negative amount {amount} for {field}")]
    NegativeAmount {
        /// Field that carried the amount
        field: String,
        /// The amount in cents
        amount: Cents,
    },

    /// Item has neither a unit price nor a line total
    #[error("Item {item} has no price")]
    MissingPrice {
        /// Item ID
        item: String,
    },

    /// Group has no people
    #[error("Group has no people")]
    EmptyGroup,

    /// Two people share an identifier
    #[error("Duplicate person ID {person}")]
    DuplicatePerson {
        /// Person ID that is duplicated
        person: String,
    },

    /// Two receipt items share an identifier
    #[error("Duplicate item ID {item}")]
    DuplicateItem {
        /// Item ID that is duplicated
        item: String,
    },

    /// Assignment refers to an item that is not on the receipt
    #[error("Assignment refers to unknown item {item}")]
    UnknownItem {
        /// Item ID that was not found
        item: String,
    },

    /// Share refers to a person that is not in the group
    #[error("Share on item {item} refers to unknown person {person}")]
    UnknownPerson {
        /// Item ID of the share
        item: String,
        /// Person ID that was not found
        person: String,
    },

    /// The same item is assigned more than once
    #[error("Item {item} is assigned more than once")]
    DuplicateAssignment {
        /// Item ID
        item: String,
    },

    /// The same person holds two shares of one item
    #[error("Person {person} holds more than one share of item {item}")]
    DuplicateShare {
        /// Item ID
        item: String,
        /// Person ID
        person: String,
    },

    /// Items with no shares at all
    ///
    /// Lists every unassigned item in receipt order.
    #[error("Items not assigned to anyone: {}", items.join(", "))]
    UnassignedItems {
        /// Item IDs that lack an assignment
        items: Vec<String>,
    },

    /// Shares on one item use different split modes
    #[error("Item {item} mixes split modes")]
    MixedSplitModes {
        /// Item ID
        item: String,
    },

    /// Claimed quantities do not add up to the item quantity
    #[error("Quantities claimed on item {item} add up to {claimed}, expected {expected}")]
    QuantityMismatch {
        /// Item ID
        item: String,
        /// Sum of claimed quantities
        claimed: u64,
        /// The item's quantity
        expected: u32,
    },

    /// Quantity or fraction weight is zero or negative
    #[error("Share of item {item} for person {person} must be positive")]
    NonPositiveShare {
        /// Item ID
        item: String,
        /// Person ID
        person: String,
    },

    /// Discount share exceeds the person's items subtotal
    #[error(
        "Discount share {discount_share} for person {person} exceeds items subtotal \
         {items_subtotal}"
    )]
    NegativeTotal {
        /// Person ID
        person: String,
        /// Person's items subtotal
        items_subtotal: Cents,
        /// Discount allocated to the person
        discount_share: Cents,
    },

    /// Reconciliation difference too large to be rounding drift
    #[error(
        "Calculated total {calculated} differs from receipt total {target} by {difference} \
         (tolerance {tolerance})"
    )]
    ReconciliationOutOfTolerance {
        /// Receipt total
        target: Cents,
        /// Sum of per-person totals before correction
        calculated: Cents,
        /// `target - calculated`
        difference: Cents,
        /// Largest difference that would have been absorbed
        tolerance: Cents,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Distribution requested over weights that sum to zero
    #[error("No positive weight to distribute {operation}")]
    ZeroWeight {
        /// Operation that was attempted
        operation: String,
    },
}

// Conversion from io::Error to SplitError
impl From<std::io::Error> for SplitError {
    fn from(error: std::io::Error) -> Self {
        SplitError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to SplitError
impl From<serde_json::Error> for SplitError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return SplitError::IoError {
                message: error.to_string(),
            };
        }

        let line = (error.line() > 0).then_some(error.line());

        SplitError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SplitError (CSV is only ever written)
impl From<csv::Error> for SplitError {
    fn from(error: csv::Error) -> Self {
        SplitError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SplitError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(field: &str, value: &str) -> Self {
        SplitError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(field: &str, amount: Cents) -> Self {
        SplitError::NegativeAmount {
            field: field.to_string(),
            amount,
        }
    }

    /// Create a MissingPrice error
    pub fn missing_price(item: &str) -> Self {
        SplitError::MissingPrice {
            item: item.to_string(),
        }
    }

    /// Create a DuplicatePerson error
    pub fn duplicate_person(person: &str) -> Self {
        SplitError::DuplicatePerson {
            person: person.to_string(),
        }
    }

    /// Create a DuplicateItem error
    pub fn duplicate_item(item: &str) -> Self {
        SplitError::DuplicateItem {
            item: item.to_string(),
        }
    }

    /// Create an UnknownItem error
    pub fn unknown_item(item: &str) -> Self {
        SplitError::UnknownItem {
            item: item.to_string(),
        }
    }

    /// Create an UnknownPerson error
    pub fn unknown_person(item: &str, person: &str) -> Self {
        SplitError::UnknownPerson {
            item: item.to_string(),
            person: person.to_string(),
        }
    }

    /// Create a DuplicateAssignment error
    pub fn duplicate_assignment(item: &str) -> Self {
        SplitError::DuplicateAssignment {
            item: item.to_string(),
        }
    }

    /// Create a DuplicateShare error
    pub fn duplicate_share(item: &str, person: &str) -> Self {
        SplitError::DuplicateShare {
            item: item.to_string(),
            person: person.to_string(),
        }
    }

    /// Create a MixedSplitModes error
    pub fn mixed_split_modes(item: &str) -> Self {
        SplitError::MixedSplitModes {
            item: item.to_string(),
        }
    }

    /// Create a QuantityMismatch error
    pub fn quantity_mismatch(item: &str, claimed: u64, expected: u32) -> Self {
        SplitError::QuantityMismatch {
            item: item.to_string(),
            claimed,
            expected,
        }
    }

    /// Create a NonPositiveShare error
    pub fn non_positive_share(item: &str, person: &str) -> Self {
        SplitError::NonPositiveShare {
            item: item.to_string(),
            person: person.to_string(),
        }
    }

    /// Create a NegativeTotal error
    pub fn negative_total(person: &str, items_subtotal: Cents, discount_share: Cents) -> Self {
        SplitError::NegativeTotal {
            person: person.to_string(),
            items_subtotal,
            discount_share,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        SplitError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a ZeroWeight error
    pub fn zero_weight(operation: &str) -> Self {
        SplitError::ZeroWeight {
            operation: operation.to_string(),
        }
    }

    /// Whether the error was raised by input validation, before allocation
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SplitError::MissingPrice { .. }
                | SplitError::NegativeAmount { .. }
                | SplitError::EmptyGroup
                | SplitError::DuplicatePerson { .. }
                | SplitError::DuplicateItem { .. }
                | SplitError::UnknownItem { .. }
                | SplitError::UnknownPerson { .. }
                | SplitError::DuplicateAssignment { .. }
                | SplitError::DuplicateShare { .. }
                | SplitError::UnassignedItems { .. }
                | SplitError::MixedSplitModes { .. }
                | SplitError::QuantityMismatch { .. }
                | SplitError::NonPositiveShare { .. }
        )
    }
}
