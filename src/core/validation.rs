//! Boundary validation of a split request
//!
//! The engine does not trust upstream validation: before any arithmetic it
//! checks referential integrity between items, people and shares, and that
//! every item on the receipt is assigned to somebody. The result indexes
//! everything by position so later stages never iterate a hash map.

use crate::types::{
    Assignment, Cents, Group, Item, ItemId, Person, Receipt, Share, SplitError, SplitMode,
};
use std::collections::{HashMap, HashSet};

/// One share, resolved to the sharer's position in the group
#[derive(Debug, Clone, Copy)]
pub struct Sharer<'a> {
    /// Index into the group's people
    pub person: usize,
    pub share: &'a Share,
}

/// A receipt item together with the shares assigned to it
#[derive(Debug, Clone)]
pub struct AssignedItem<'a> {
    pub item: &'a Item,
    pub line_total: Cents,
    pub mode: SplitMode,

    /// Sharers in declaration order
    pub sharers: Vec<Sharer<'a>>,
}

/// Input that passed every structural check
#[derive(Debug, Clone)]
pub struct ValidatedSplit<'a> {
    pub people: &'a [Person],

    /// Assigned items in receipt order
    pub items: Vec<AssignedItem<'a>>,

    /// Sum of every item's line total
    pub line_total_sum: Cents,
}

/// Items on the receipt that nobody holds a share of, in receipt order
///
/// An assignment with an empty share list counts as unassigned.
pub fn unassigned_items<'a>(receipt: &'a Receipt, assignments: &[Assignment]) -> Vec<&'a ItemId> {
    let assigned: HashSet<&str> = assignments
        .iter()
        .filter(|a| !a.shares.is_empty())
        .map(|a| a.item_id.as_str())
        .collect();

    receipt
        .items
        .iter()
        .filter(|item| !assigned.contains(item.id.as_str()))
        .map(|item| &item.id)
        .collect()
}

/// Validate a receipt, group and assignment set
///
/// # Errors
///
/// Returns the first structural error found, checked in this order:
/// - The group is empty or has duplicate person IDs
/// - A receipt amount (or item line total) is negative, or an item has no price
/// - Two items share an ID
/// - An assignment refers to an unknown item, or an item is assigned twice
/// - A share refers to an unknown person, a person appears twice on one
///   item, or one item mixes split modes
/// - Any item is unassigned (all such items are listed together)
pub fn validate<'a>(
    receipt: &'a Receipt,
    group: &'a Group,
    assignments: &'a [Assignment],
) -> Result<ValidatedSplit<'a>, SplitError> {
    let person_index = index_people(group)?;

    check_receipt_amounts(receipt)?;

    let mut item_index: HashMap<&str, usize> = HashMap::with_capacity(receipt.items.len());
    let mut line_totals = Vec::with_capacity(receipt.items.len());
    let mut line_total_sum: Cents = 0;

    for (position, item) in receipt.items.iter().enumerate() {
        if item_index.insert(item.id.as_str(), position).is_some() {
            return Err(SplitError::duplicate_item(&item.id));
        }

        let line_total = item.line_total()?;
        if line_total < 0 {
            return Err(SplitError::negative_amount(
                &format!("items[{}].line_total", item.id),
                line_total,
            ));
        }

        line_total_sum = line_total_sum
            .checked_add(line_total)
            .ok_or_else(|| SplitError::arithmetic_overflow("items subtotal"))?;
        line_totals.push(line_total);
    }

    // Position of each item's assignment, in receipt order
    let mut assigned: Vec<Option<&Assignment>> = vec![None; receipt.items.len()];

    for assignment in assignments {
        let position = *item_index
            .get(assignment.item_id.as_str())
            .ok_or_else(|| SplitError::unknown_item(&assignment.item_id))?;

        if assigned[position].is_some() {
            return Err(SplitError::duplicate_assignment(&assignment.item_id));
        }

        check_shares(assignment, &person_index)?;
        assigned[position] = Some(assignment);
    }

    let unassigned = unassigned_items(receipt, assignments);
    if !unassigned.is_empty() {
        return Err(SplitError::UnassignedItems {
            items: unassigned.into_iter().cloned().collect(),
        });
    }

    let items = receipt
        .items
        .iter()
        .zip(line_totals)
        .zip(assigned)
        .filter_map(|((item, line_total), assignment)| {
            assignment.map(|a| AssignedItem {
                item,
                line_total,
                mode: a.shares[0].split.mode(),
                sharers: a
                    .shares
                    .iter()
                    .map(|share| Sharer {
                        person: person_index[share.person_id.as_str()],
                        share,
                    })
                    .collect(),
            })
        })
        .collect();

    Ok(ValidatedSplit {
        people: &group.people,
        items,
        line_total_sum,
    })
}

/// Build the person-ID index, rejecting empty groups and duplicate IDs
fn index_people(group: &Group) -> Result<HashMap<&str, usize>, SplitError> {
    if group.is_empty() {
        return Err(SplitError::EmptyGroup);
    }

    let mut index = HashMap::with_capacity(group.len());
    for (position, person) in group.people.iter().enumerate() {
        if index.insert(person.id.as_str(), position).is_some() {
            return Err(SplitError::duplicate_person(&person.id));
        }
    }

    Ok(index)
}

fn check_receipt_amounts(receipt: &Receipt) -> Result<(), SplitError> {
    let amounts = [
        ("receipt.tax", Some(receipt.tax)),
        ("receipt.tip", Some(receipt.tip)),
        ("receipt.discount", Some(receipt.discount)),
        ("receipt.service_fee", Some(receipt.service_fee)),
        ("receipt.subtotal", receipt.subtotal),
        ("receipt.total", Some(receipt.total)),
    ];

    for (field, amount) in amounts {
        if let Some(amount) = amount.filter(|a| *a < 0) {
            return Err(SplitError::negative_amount(field, amount));
        }
    }

    Ok(())
}

/// Check one assignment's shares against the group
fn check_shares(
    assignment: &Assignment,
    person_index: &HashMap<&str, usize>,
) -> Result<(), SplitError> {
    let item = assignment.item_id.as_str();
    let mut seen: HashSet<&str> = HashSet::with_capacity(assignment.shares.len());

    for share in &assignment.shares {
        let person = share.person_id.as_str();

        if !person_index.contains_key(person) {
            return Err(SplitError::unknown_person(item, person));
        }

        if !seen.insert(person) {
            return Err(SplitError::duplicate_share(item, person));
        }
    }

    if let Some(first) = assignment.shares.first() {
        let mode = first.split.mode();
        if assignment.shares.iter().any(|s| s.split.mode() != mode) {
            return Err(SplitError::mixed_split_modes(item));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn group() -> Group {
        Group::new(vec![
            Person::new("alice", "Alice"),
            Person::new("bob", "Bob"),
            Person::new("charlie", "Charlie"),
        ])
    }

    fn receipt() -> Receipt {
        Receipt::new(
            vec![
                Item::new("pizza", "Pizza", 2000, 1),
                Item::new("wings", "Wings", 1500, 1),
                Item::new("drinks", "Drinks", 500, 2),
            ],
            4500,
        )
    }

    fn full_assignments() -> Vec<Assignment> {
        vec![
            Assignment::even("pizza", &["alice", "bob", "charlie"]),
            Assignment::even("wings", &["bob"]),
            Assignment::even("drinks", &["alice", "bob", "charlie"]),
        ]
    }

    #[test]
    fn test_valid_input_is_indexed_in_receipt_order() {
        let receipt = receipt();
        let group = group();
        // Declared out of receipt order on purpose
        let mut assignments = full_assignments();
        assignments.reverse();

        let validated = validate(&receipt, &group, &assignments).unwrap();

        let ids: Vec<&str> = validated.items.iter().map(|i| i.item.id.as_str()).collect();
        assert_eq!(ids, vec!["pizza", "wings", "drinks"]);
        assert_eq!(validated.line_total_sum, 4500);
        assert_eq!(validated.items[2].line_total, 1000);
        assert_eq!(validated.items[1].sharers[0].person, 1);
        assert_eq!(validated.items[0].mode, SplitMode::Even);
    }

    #[test]
    fn test_unassigned_items_are_all_reported_in_receipt_order() {
        let receipt = receipt();
        let group = group();
        let assignments = vec![
            Assignment::even("wings", &["bob"]),
            Assignment::new("drinks", vec![]),
        ];

        let err = validate(&receipt, &group, &assignments).unwrap_err();
        assert_eq!(
            err,
            SplitError::UnassignedItems {
                items: vec!["pizza".to_string(), "drinks".to_string()]
            }
        );
    }

    #[test]
    fn test_unassigned_items_helper() {
        let receipt = receipt();
        let assignments = vec![Assignment::even("pizza", &["alice"])];
        let missing = unassigned_items(&receipt, &assignments);
        assert_eq!(missing, vec!["wings", "drinks"]);
    }

    #[rstest]
    #[case::unknown_item(
        vec![Assignment::even("salad", &["alice"])],
        SplitError::unknown_item("salad")
    )]
    #[case::unknown_person(
        vec![Assignment::even("pizza", &["alice", "dave"])],
        SplitError::unknown_person("pizza", "dave")
    )]
    #[case::duplicate_assignment(
        vec![Assignment::even("pizza", &["alice"]), Assignment::even("pizza", &["bob"])],
        SplitError::duplicate_assignment("pizza")
    )]
    #[case::duplicate_share(
        vec![Assignment::even("pizza", &["alice", "alice"])],
        SplitError::duplicate_share("pizza", "alice")
    )]
    #[case::mixed_modes(
        vec![Assignment::new("pizza", vec![Share::even("alice"), Share::quantity("bob", 1)])],
        SplitError::mixed_split_modes("pizza")
    )]
    fn test_structural_errors(#[case] assignments: Vec<Assignment>, #[case] expected: SplitError) {
        let receipt = receipt();
        let group = group();
        let err = validate(&receipt, &group, &assignments).unwrap_err();
        assert_eq!(err, expected);
        assert!(err.is_structural());
    }

    #[test]
    fn test_empty_group_rejected() {
        let receipt = receipt();
        let group = Group::new(vec![]);
        let err = validate(&receipt, &group, &full_assignments()).unwrap_err();
        assert_eq!(err, SplitError::EmptyGroup);
    }

    #[test]
    fn test_duplicate_person_rejected() {
        let receipt = receipt();
        let group = Group::new(vec![Person::new("a", "Ann"), Person::new("a", "Andy")]);
        let err = validate(&receipt, &group, &[]).unwrap_err();
        assert_eq!(err, SplitError::duplicate_person("a"));
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let receipt = Receipt::new(
            vec![Item::new("1", "Soup", 500, 1), Item::new("1", "Bread", 300, 1)],
            800,
        );
        let err = validate(&receipt, &group(), &[]).unwrap_err();
        assert_eq!(err, SplitError::duplicate_item("1"));
    }

    #[rstest]
    #[case::tax("receipt.tax")]
    #[case::tip("receipt.tip")]
    #[case::total("receipt.total")]
    fn test_negative_receipt_amounts_rejected(#[case] field: &str) {
        let mut receipt = receipt();
        match field {
            "receipt.tax" => receipt.tax = -1,
            "receipt.tip" => receipt.tip = -1,
            "receipt.total" => receipt.total = -1,
            _ => panic!("Unknown field: {}", field),
        }
        let err = validate(&receipt, &group(), &full_assignments()).unwrap_err();
        assert_eq!(err, SplitError::negative_amount(field, -1));
    }

    #[test]
    fn test_negative_line_total_rejected() {
        let mut receipt = receipt();
        receipt.items[0].total_price = Some(-200);
        let err = validate(&receipt, &group(), &full_assignments()).unwrap_err();
        assert_eq!(err, SplitError::negative_amount("items[pizza].line_total", -200));
    }

    #[test]
    fn test_item_without_price_rejected() {
        let mut receipt = receipt();
        receipt.items[1].unit_price = None;
        let err = validate(&receipt, &group(), &full_assignments()).unwrap_err();
        assert_eq!(err, SplitError::missing_price("wings"));
    }
}
