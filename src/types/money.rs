//! Monetary representation for the split engine
//!
//! Every amount inside the engine is an integer count of minimum currency
//! units (cents). Decimal values only exist at the boundary, where upstream
//! data is parsed with `rust_decimal` and converted exactly.

use super::error::SplitError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Amount in minimum currency units (e.g. cents)
pub type Cents = i64;

/// Number of decimal places represented by one minimum currency unit
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Convert a decimal amount into cents
///
/// The conversion is exact: a value carrying a non-zero fraction of a cent
/// is rejected rather than rounded.
///
/// # Arguments
///
/// * `value` - The decimal amount (e.g. `12.34`)
/// * `field` - Field name used in the error message
///
/// # Errors
///
/// Returns `InvalidAmount` if the value has sub-cent precision or does
/// not fit into an `i64` number of cents.
pub fn to_cents(value: Decimal, field: &str) -> Result<Cents, SplitError> {
    let scaled = value
        .checked_mul(Decimal::from(10_i64.pow(MINOR_UNIT_SCALE)))
        .ok_or_else(|| SplitError::invalid_amount(field, &value.to_string()))?;

    if !scaled.fract().is_zero() {
        return Err(SplitError::invalid_amount(field, &value.to_string()));
    }

    scaled
        .to_i64()
        .ok_or_else(|| SplitError::invalid_amount(field, &value.to_string()))
}

/// Render cents as a fixed-scale decimal string (`1750` -> `"17.50"`)
pub fn format_cents(cents: Cents) -> String {
    Decimal::new(cents, MINOR_UNIT_SCALE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::whole("20", 2000)]
    #[case::two_places("17.50", 1750)]
    #[case::one_place("4.5", 450)]
    #[case::trailing_zeros("9.9900", 999)]
    #[case::negative("-6.00", -600)]
    #[case::zero("0", 0)]
    fn test_to_cents(#[case] input: &str, #[case] expected: Cents) {
        let value = Decimal::from_str(input).unwrap();
        assert_eq!(to_cents(value, "total").unwrap(), expected);
    }

    #[rstest]
    #[case::sub_cent("10.005")]
    #[case::tiny("0.001")]
    fn test_to_cents_rejects_sub_cent_precision(#[case] input: &str) {
        let value = Decimal::from_str(input).unwrap();
        let err = to_cents(value, "tax").unwrap_err();
        assert!(matches!(err, SplitError::InvalidAmount { ref field, .. } if field == "tax"));
    }

    #[test]
    fn test_to_cents_rejects_out_of_range() {
        let err = to_cents(Decimal::MAX, "total").unwrap_err();
        assert!(matches!(err, SplitError::InvalidAmount { .. }));
    }

    #[rstest]
    #[case(1750, "17.50")]
    #[case(5, "0.05")]
    #[case(-5, "-0.05")]
    #[case(0, "0.00")]
    #[case(100000, "1000.00")]
    fn test_format_cents(#[case] cents: Cents, #[case] expected: &str) {
        assert_eq!(format_cents(cents), expected);
    }
}
