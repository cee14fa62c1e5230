//! Exact integer distribution of an amount over weights
//!
//! Every split in the engine (item shares, adjustment pools) goes through
//! [`distribute`], so the parts always add up to the whole.
//!
//! # Residual Order
//!
//! Each participant first receives `floor(amount * weight / total_weight)`.
//! The units left over are handed out one at a time to participants with a
//! positive weight, largest remainder `(amount * weight) % total_weight`
//! first, ties broken by position in the slice. With equal weights every
//! remainder is equal, so leftovers simply go in declaration order.
//!
//! Leftovers are placed per call. When several items are split evenly, the
//! first-declared sharer can receive one unit from each of them.

use crate::types::{Cents, SplitError};

/// Result of distributing one amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// One amount per weight, in the same order
    pub amounts: Vec<Cents>,

    /// Units handed out after floor division
    pub residual_units: Cents,
}

/// Distribute a non-negative amount in proportion to non-negative weights
///
/// # Arguments
///
/// * `amount` - Amount to split, in minimum currency units
/// * `weights` - One weight per participant; zero means "gets nothing"
/// * `operation` - Name used in error messages
///
/// # Errors
///
/// Returns an error if:
/// - The amount is negative (`NegativeAmount`)
/// - All weights are zero (`ZeroWeight`)
/// - `amount * weight` overflows 128-bit arithmetic
pub fn distribute(
    amount: Cents,
    weights: &[u128],
    operation: &str,
) -> Result<Distribution, SplitError> {
    if amount < 0 {
        return Err(SplitError::negative_amount(operation, amount));
    }

    let total_weight = weights
        .iter()
        .try_fold(0_u128, |acc, &w| acc.checked_add(w))
        .ok_or_else(|| SplitError::arithmetic_overflow(operation))?;

    if total_weight == 0 {
        return Err(SplitError::zero_weight(operation));
    }

    let amount_wide = amount as u128;
    let mut amounts = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    let mut allocated: u128 = 0;

    for &weight in weights {
        let numerator = amount_wide
            .checked_mul(weight)
            .ok_or_else(|| SplitError::arithmetic_overflow(operation))?;
        let quotient = numerator / total_weight;
        allocated += quotient;
        // quotient <= amount, so it always fits back into Cents
        amounts.push(quotient as Cents);
        remainders.push(numerator % total_weight);
    }

    let residual = amount_wide - allocated;

    // Positive-weight participants, largest remainder first, stable on ties
    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0).collect();
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));

    for &index in order.iter().take(residual as usize) {
        amounts[index] += 1;
    }

    Ok(Distribution {
        amounts,
        residual_units: residual as Cents,
    })
}

/// Weights for an equal split among `count` participants
pub fn even_weights(count: usize) -> Vec<u128> {
    vec![1; count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact_thirds(999, vec![1, 1, 1], vec![333, 333, 333], 0)]
    #[case::one_left_over(1000, vec![1, 1, 1], vec![334, 333, 333], 1)]
    #[case::two_left_over(2000, vec![1, 1, 1], vec![667, 667, 666], 2)]
    #[case::sixty_forty(450, vec![600, 400], vec![270, 180], 0)]
    #[case::quantity_two_to_one(1500, vec![2, 1], vec![1000, 500], 0)]
    #[case::largest_remainder_wins(1000, vec![1, 2], vec![333, 667], 1)]
    #[case::zero_weight_gets_nothing(100, vec![0, 1, 1], vec![0, 50, 50], 0)]
    #[case::zero_weight_skipped_for_residual(101, vec![0, 1, 1], vec![0, 51, 50], 1)]
    #[case::zero_amount(0, vec![3, 1], vec![0, 0], 0)]
    #[case::single_participant(1234, vec![7], vec![1234], 0)]
    fn test_distribute(
        #[case] amount: Cents,
        #[case] weights: Vec<u128>,
        #[case] expected: Vec<Cents>,
        #[case] expected_residual: Cents,
    ) {
        let result = distribute(amount, &weights, "test").unwrap();
        assert_eq!(result.amounts, expected);
        assert_eq!(result.residual_units, expected_residual);
        assert_eq!(result.amounts.iter().sum::<Cents>(), amount);
    }

    #[test]
    fn test_distribute_rejects_all_zero_weights() {
        let err = distribute(100, &[0, 0], "tax").unwrap_err();
        assert_eq!(err, SplitError::zero_weight("tax"));
    }

    #[test]
    fn test_distribute_rejects_negative_amount() {
        let err = distribute(-100, &[1, 1], "tip").unwrap_err();
        assert_eq!(err, SplitError::negative_amount("tip", -100));
    }

    #[test]
    fn test_distribute_rejects_empty_weights() {
        let err = distribute(100, &[], "tip").unwrap_err();
        assert_eq!(err, SplitError::zero_weight("tip"));
    }

    #[test]
    fn test_distribute_overflow() {
        let err = distribute(Cents::MAX, &[u128::MAX, 1], "tax").unwrap_err();
        assert!(matches!(err, SplitError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_even_split_never_differs_by_more_than_one_unit() {
        for amount in [1, 7, 99, 1000, 12345] {
            for count in 1..=9 {
                let result = distribute(amount, &even_weights(count), "even").unwrap();
                let max = result.amounts.iter().max().unwrap();
                let min = result.amounts.iter().min().unwrap();
                assert!(max - min <= 1, "amount {} over {}", amount, count);
                assert_eq!(result.amounts.iter().sum::<Cents>(), amount);
            }
        }
    }

    #[test]
    fn test_even_split_leftovers_follow_declaration_order() {
        let result = distribute(1003, &even_weights(5), "even").unwrap();
        assert_eq!(result.amounts, vec![201, 201, 201, 200, 200]);
    }

    #[test]
    fn test_double_weight_gets_within_one_unit_of_double() {
        for amount in 0..500 {
            let result = distribute(amount, &[2, 1, 3], "tax").unwrap();
            let a = result.amounts[0];
            let b = result.amounts[1];
            assert!((a - 2 * b).abs() <= 1, "amount {}: {} vs {}", amount, a, b);
        }
    }
}
