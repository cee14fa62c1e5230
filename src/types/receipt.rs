//! Receipt-related types
//!
//! A receipt is handed to the engine fully parsed: every monetary field is
//! already in cents. The receipt's `total` is authoritative.

use super::error::SplitError;
use super::money::Cents;
use serde::{Deserialize, Serialize};

/// Item identifier, unique within one receipt
pub type ItemId = String;

/// One line item on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for the item
    pub id: ItemId,

    /// Display name as printed on the receipt
    pub name: String,

    /// Price per unit, if the receipt states one
    pub unit_price: Option<Cents>,

    /// Number of units ordered
    pub quantity: u32,

    /// Explicit line total
    ///
    /// Takes precedence over `unit_price * quantity` when present.
    pub total_price: Option<Cents>,
}

impl Item {
    /// Create an item priced per unit
    pub fn new(id: &str, name: &str, unit_price: Cents, quantity: u32) -> Self {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: Some(unit_price),
            quantity,
            total_price: None,
        }
    }

    /// Compute the line total for this item
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither a unit price nor an explicit total is present
    /// - `unit_price * quantity` overflows
    pub fn line_total(&self) -> Result<Cents, SplitError> {
        if let Some(total) = self.total_price {
            return Ok(total);
        }

        let unit_price = self
            .unit_price
            .ok_or_else(|| SplitError::missing_price(&self.id))?;

        unit_price
            .checked_mul(Cents::from(self.quantity))
            .ok_or_else(|| SplitError::arithmetic_overflow("line total"))
    }
}

/// A fully parsed receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Restaurant or merchant name
    pub merchant_name: Option<String>,

    /// ISO 4217 currency code, carried through to the breakdown
    pub currency: String,

    /// Line items in the order they appear on the receipt
    pub items: Vec<Item>,

    /// Subtotal as printed on the receipt (informational)
    pub subtotal: Option<Cents>,

    /// Tax amount
    pub tax: Cents,

    /// Tip amount
    pub tip: Cents,

    /// Discount magnitude (subtracted from the bill)
    pub discount: Cents,

    /// Service or delivery fee
    pub service_fee: Cents,

    /// Grand total; the target every breakdown reconciles to
    pub total: Cents,
}

impl Receipt {
    /// Create a receipt with items and a total and no adjustments
    pub fn new(items: Vec<Item>, total: Cents) -> Self {
        Receipt {
            merchant_name: None,
            currency: "USD".to_string(),
            items,
            subtotal: None,
            tax: 0,
            tip: 0,
            discount: 0,
            service_fee: 0,
            total,
        }
    }

    /// Copy of this receipt with the given items taken off the bill
    ///
    /// Each excluded item's line total is subtracted from `total`, and from
    /// the stated `subtotal` when there is one. Adjustment pools are kept
    /// as printed and still fall on the whole group.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An ID does not name an item on this receipt (`UnknownItem`)
    /// - An excluded item has no price (`MissingPrice`)
    /// - The subtraction overflows
    pub fn without_items(&self, excluded: &[&str]) -> Result<Receipt, SplitError> {
        if let Some(unknown) = excluded
            .iter()
            .find(|id| !self.items.iter().any(|item| item.id == **id))
        {
            return Err(SplitError::unknown_item(unknown));
        }

        let mut receipt = self.clone();
        let mut removed: Cents = 0;
        receipt.items.clear();

        for item in &self.items {
            if excluded.contains(&item.id.as_str()) {
                removed = removed
                    .checked_add(item.line_total()?)
                    .ok_or_else(|| SplitError::arithmetic_overflow("excluded items"))?;
            } else {
                receipt.items.push(item.clone());
            }
        }

        receipt.total = self
            .total
            .checked_sub(removed)
            .ok_or_else(|| SplitError::arithmetic_overflow("excluded items"))?;
        if let Some(subtotal) = self.subtotal {
            receipt.subtotal = Some(
                subtotal
                    .checked_sub(removed)
                    .ok_or_else(|| SplitError::arithmetic_overflow("excluded items"))?,
            );
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unit_price_times_quantity(Some(500), 3, None, 1500)]
    #[case::single_unit(Some(999), 1, None, 999)]
    #[case::override_wins(Some(500), 3, Some(1400), 1400)]
    #[case::override_only(None, 2, Some(800), 800)]
    #[case::zero_quantity(Some(500), 0, None, 0)]
    fn test_line_total(
        #[case] unit_price: Option<Cents>,
        #[case] quantity: u32,
        #[case] total_price: Option<Cents>,
        #[case] expected: Cents,
    ) {
        let item = Item {
            id: "1".to_string(),
            name: "Tacos".to_string(),
            unit_price,
            quantity,
            total_price,
        };
        assert_eq!(item.line_total().unwrap(), expected);
    }

    #[test]
    fn test_line_total_without_price_fails() {
        let item = Item {
            id: "7".to_string(),
            name: "Mystery".to_string(),
            unit_price: None,
            quantity: 1,
            total_price: None,
        };
        assert_eq!(item.line_total().unwrap_err(), SplitError::missing_price("7"));
    }

    #[test]
    fn test_line_total_overflow() {
        let item = Item::new("1", "Gold", Cents::MAX, 2);
        assert!(matches!(
            item.line_total().unwrap_err(),
            SplitError::ArithmeticOverflow { .. }
        ));
    }

    #[test]
    fn test_without_items_restates_totals() {
        let mut receipt = Receipt::new(
            vec![
                Item::new("a", "Pizza", 2000, 1),
                Item::new("b", "Wings", 750, 2),
                Item::new("c", "Soda", 300, 1),
            ],
            4200,
        );
        receipt.subtotal = Some(3800);
        receipt.tax = 400;

        let trimmed = receipt.without_items(&["b"]).unwrap();
        let ids: Vec<&str> = trimmed.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(trimmed.total, 2700);
        assert_eq!(trimmed.subtotal, Some(2300));
        assert_eq!(trimmed.tax, 400);
    }

    #[test]
    fn test_without_no_items_is_unchanged() {
        let receipt = Receipt::new(vec![Item::new("a", "Pizza", 2000, 1)], 2000);
        assert_eq!(receipt.without_items(&[]).unwrap(), receipt);
    }

    #[test]
    fn test_without_unknown_item_fails() {
        let receipt = Receipt::new(vec![Item::new("a", "Pizza", 2000, 1)], 2000);
        assert_eq!(
            receipt.without_items(&["z"]).unwrap_err(),
            SplitError::unknown_item("z")
        );
    }
}
