//! Item-to-people assignment types
//!
//! An assignment maps one receipt item to an ordered list of shares. Each
//! share binds a person to how their portion of that item is measured.

use super::group::PersonId;
use super::receipt::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How one person's portion of an item is measured
///
/// All shares on one item must use the same variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Split {
    /// Equal portion among everyone sharing the item
    Even,

    /// Portion proportional to the units this person claims
    ///
    /// Claimed quantities on one item must add up to the item's quantity.
    Quantity { quantity: u32 },

    /// Portion proportional to an explicit positive weight
    ///
    /// Weights are normalised by their sum, so `0.5/0.5` and `1/1` are
    /// the same split.
    Fraction { weight: Decimal },
}

impl Split {
    /// The mode tag of this split, without its parameters
    pub fn mode(&self) -> SplitMode {
        match self {
            Split::Even => SplitMode::Even,
            Split::Quantity { .. } => SplitMode::Quantity,
            Split::Fraction { .. } => SplitMode::Fraction,
        }
    }
}

/// Split mode tag used for validation and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    Even,
    Quantity,
    Fraction,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Even => write!(f, "even"),
            SplitMode::Quantity => write!(f, "quantity"),
            SplitMode::Fraction => write!(f, "fraction"),
        }
    }
}

/// One person's share of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub person_id: PersonId,

    #[serde(flatten)]
    pub split: Split,
}

impl Share {
    pub fn even(person_id: &str) -> Self {
        Share {
            person_id: person_id.to_string(),
            split: Split::Even,
        }
    }

    pub fn quantity(person_id: &str, quantity: u32) -> Self {
        Share {
            person_id: person_id.to_string(),
            split: Split::Quantity { quantity },
        }
    }

    pub fn fraction(person_id: &str, weight: Decimal) -> Self {
        Share {
            person_id: person_id.to_string(),
            split: Split::Fraction { weight },
        }
    }
}

/// Assignment of one item to the people sharing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub item_id: ItemId,
    pub shares: Vec<Share>,
}

impl Assignment {
    pub fn new(item_id: &str, shares: Vec<Share>) -> Self {
        Assignment {
            item_id: item_id.to_string(),
            shares,
        }
    }

    /// Assign an item evenly to the given people, in the given order
    pub fn even(item_id: &str, people: &[&str]) -> Self {
        Assignment::new(item_id, people.iter().map(|p| Share::even(p)).collect())
    }
}
