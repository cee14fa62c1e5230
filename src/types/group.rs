//! People splitting the bill

use serde::{Deserialize, Serialize};

/// Person identifier, unique within one group
pub type PersonId = String;

/// One person in the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn new(id: &str, name: &str) -> Self {
        Person {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// The people splitting one receipt
///
/// Declaration order is significant: it is the stable order used for
/// even-split leftovers and for reconciliation corrections, and it is the
/// order of rows in the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub people: Vec<Person>,
}

impl Group {
    pub fn new(people: Vec<Person>) -> Self {
        Group { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
