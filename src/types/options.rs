//! Allocation options for the adjustment pools

use super::money::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How one adjustment pool is spread across the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    /// In proportion to each person's items subtotal
    #[default]
    Proportional,

    /// Equally across everyone in the group, whatever they ordered
    Even,
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMode::Proportional => write!(f, "proportional"),
            AllocationMode::Even => write!(f, "even"),
        }
    }
}

/// The four adjustment pools allocated independently of item assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Discount,
    Tax,
    Tip,
    ServiceFee,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Discount => write!(f, "discount"),
            Pool::Tax => write!(f, "tax"),
            Pool::Tip => write!(f, "tip"),
            Pool::ServiceFee => write!(f, "service_fee"),
        }
    }
}

/// Options for one split calculation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub tax_mode: AllocationMode,
    pub tip_mode: AllocationMode,
    pub discount_mode: AllocationMode,
    pub fee_mode: AllocationMode,

    /// Largest reconciliation difference absorbed without failing
    ///
    /// Defaults to the number of people in the group.
    pub max_residual: Option<Cents>,
}

impl SplitOptions {
    /// The configured mode for a pool
    pub fn mode_for(&self, pool: Pool) -> AllocationMode {
        match pool {
            Pool::Discount => self.discount_mode,
            Pool::Tax => self.tax_mode,
            Pool::Tip => self.tip_mode,
            Pool::ServiceFee => self.fee_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_proportional() {
        let options = SplitOptions::default();
        for pool in [Pool::Discount, Pool::Tax, Pool::Tip, Pool::ServiceFee] {
            assert_eq!(options.mode_for(pool), AllocationMode::Proportional);
        }
        assert_eq!(options.max_residual, None);
    }

    #[test]
    fn test_partial_options_deserialize_with_defaults() {
        let options: SplitOptions = serde_json::from_str(r#"{"tip_mode":"even"}"#).unwrap();
        assert_eq!(options.tip_mode, AllocationMode::Even);
        assert_eq!(options.tax_mode, AllocationMode::Proportional);
        assert_eq!(options.fee_mode, AllocationMode::Proportional);
    }

    #[test]
    fn test_mode_for_routes_each_pool() {
        let options = SplitOptions {
            tax_mode: AllocationMode::Even,
            tip_mode: AllocationMode::Proportional,
            discount_mode: AllocationMode::Even,
            fee_mode: AllocationMode::Proportional,
            max_residual: None,
        };
        assert_eq!(options.mode_for(Pool::Tax), AllocationMode::Even);
        assert_eq!(options.mode_for(Pool::Tip), AllocationMode::Proportional);
        assert_eq!(options.mode_for(Pool::Discount), AllocationMode::Even);
        assert_eq!(options.mode_for(Pool::ServiceFee), AllocationMode::Proportional);
    }
}
