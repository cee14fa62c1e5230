//! Per-person items subtotal aggregation

use crate::core::share_resolver::ResolvedShare;
use crate::core::validation::AssignedItem;
use crate::types::{Cents, ItemShare, SplitError};

/// Running per-person item totals, indexed by group position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtotalLedger {
    subtotals: Vec<Cents>,
    details: Vec<Vec<ItemShare>>,
}

impl SubtotalLedger {
    /// Create an empty ledger for `people` participants
    pub fn new(people: usize) -> Self {
        SubtotalLedger {
            subtotals: vec![0; people],
            details: vec![Vec::new(); people],
        }
    }

    /// Add one item's resolved shares to the ledger
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a person's subtotal would overflow.
    pub fn record(
        &mut self,
        assigned: &AssignedItem<'_>,
        shares: &[ResolvedShare],
    ) -> Result<(), SplitError> {
        for share in shares {
            let subtotal = &mut self.subtotals[share.person];
            *subtotal = subtotal
                .checked_add(share.amount)
                .ok_or_else(|| SplitError::arithmetic_overflow("items subtotal"))?;

            self.details[share.person].push(ItemShare {
                item_id: assigned.item.id.clone(),
                item_name: assigned.item.name.clone(),
                line_total: assigned.line_total,
                amount: share.amount,
                mode: assigned.mode,
            });
        }

        Ok(())
    }

    /// Items subtotal per person, in group order
    pub fn subtotals(&self) -> &[Cents] {
        &self.subtotals
    }

    /// Sum of every person's items subtotal
    pub fn total(&self) -> Cents {
        self.subtotals.iter().sum()
    }

    /// Consume the ledger, returning subtotals and item details
    pub fn into_parts(self) -> (Vec<Cents>, Vec<Vec<ItemShare>>) {
        (self.subtotals, self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::share_resolver::resolve_item;
    use crate::core::validation::validate;
    use crate::types::{Assignment, Group, Item, Person, Receipt, Share, SplitMode};

    #[test]
    fn test_subtotals_add_up_to_line_totals() {
        let receipt = Receipt::new(
            vec![
                Item::new("1", "Pizza", 2000, 1),
                Item::new("2", "Wings", 1500, 1),
                Item::new("3", "Drinks", 1000, 1),
            ],
            4500,
        );
        let group = Group::new(vec![
            Person::new("alice", "Alice"),
            Person::new("bob", "Bob"),
            Person::new("charlie", "Charlie"),
        ]);
        let assignments = vec![
            Assignment::even("1", &["alice", "bob", "charlie"]),
            Assignment::even("2", &["bob"]),
            Assignment::even("3", &["alice", "bob", "charlie"]),
        ];

        let validated = validate(&receipt, &group, &assignments).unwrap();
        let mut ledger = SubtotalLedger::new(group.len());
        for item in &validated.items {
            let shares = resolve_item(item).unwrap();
            ledger.record(item, &shares).unwrap();
        }

        assert_eq!(ledger.subtotals(), &[1001, 2500, 999]);
        assert_eq!(ledger.total(), validated.line_total_sum);

        let (_, details) = ledger.into_parts();
        let bob: Vec<(&str, Cents)> = details[1]
            .iter()
            .map(|d| (d.item_id.as_str(), d.amount))
            .collect();
        assert_eq!(bob, vec![("1", 667), ("2", 1500), ("3", 333)]);
        assert_eq!(details[2].len(), 2);
    }

    #[test]
    fn test_item_details_carry_mode_and_line_total() {
        let receipt = Receipt::new(vec![Item::new("t", "Tacos", 500, 3)], 1500);
        let group = Group::new(vec![Person::new("a", "Ann"), Person::new("b", "Ben")]);
        let assignments = vec![Assignment::new(
            "t",
            vec![Share::quantity("a", 2), Share::quantity("b", 1)],
        )];

        let validated = validate(&receipt, &group, &assignments).unwrap();
        let mut ledger = SubtotalLedger::new(group.len());
        let shares = resolve_item(&validated.items[0]).unwrap();
        ledger.record(&validated.items[0], &shares).unwrap();

        let (subtotals, details) = ledger.into_parts();
        assert_eq!(subtotals, vec![1000, 500]);
        assert_eq!(details[0][0].mode, SplitMode::Quantity);
        assert_eq!(details[0][0].line_total, 1500);
        assert_eq!(details[0][0].item_name, "Tacos");
    }
}
