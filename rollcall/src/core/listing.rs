//! Checked / unchecked listings derived from the roster and record set.

use crate::core::roster::Roster;
use crate::core::types::{CheckInRecord, Identity, IdentityId};

/// One row of the checked listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedEntry {
    pub id: IdentityId,
    /// `None` when the record refers to an id no longer on the roster.
    pub name: Option<String>,
    pub timestamp: Option<String>,
}

/// Both listings, computed together from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listings {
    pub checked: Vec<CheckedEntry>,
    pub unchecked: Vec<Identity>,
}

/// Records in insertion order, joined with roster names.
pub fn checked(roster: &Roster, records: &[CheckInRecord]) -> Vec<CheckedEntry> {
    records
        .iter()
        .map(|record| CheckedEntry {
            id: record.identifier,
            name: roster.name_of(record.identifier).map(str::to_string),
            timestamp: record.timestamp.clone(),
        })
        .collect()
}

/// Roster identities with no record, in roster order.
pub fn unchecked(roster: &Roster, records: &[CheckInRecord]) -> Vec<Identity> {
    roster
        .iter()
        .filter(|identity| !records.iter().any(|record| record.identifier == identity.id))
        .cloned()
        .collect()
}

pub fn listings(roster: &Roster, records: &[CheckInRecord]) -> Listings {
    Listings {
        checked: checked(roster, records),
        unchecked: unchecked(roster, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn roster() -> Roster {
        Roster::from_identities(vec![
            Identity::new(1, "A"),
            Identity::new(2, "B"),
            Identity::new(3, "C"),
        ])
        .expect("roster")
    }

    #[test]
    fn checked_keeps_insertion_order_and_unchecked_keeps_roster_order() {
        let roster = roster();
        let records = vec![CheckInRecord::pending(3), CheckInRecord::pending(1)];
        let listings = listings(&roster, &records);
        let checked: Vec<IdentityId> = listings.checked.iter().map(|entry| entry.id).collect();
        assert_eq!(checked, vec![3, 1]);
        assert_eq!(listings.unchecked, vec![Identity::new(2, "B")]);
    }

    #[test]
    fn listings_partition_the_roster() {
        let roster = roster();
        let records = vec![CheckInRecord::pending(2)];
        let listings = listings(&roster, &records);
        let checked: HashSet<IdentityId> = listings.checked.iter().map(|entry| entry.id).collect();
        let unchecked: HashSet<IdentityId> =
            listings.unchecked.iter().map(|identity| identity.id).collect();
        assert!(checked.is_disjoint(&unchecked));
        let all: HashSet<IdentityId> = roster.iter().map(|identity| identity.id).collect();
        assert_eq!(&checked | &unchecked, all);
    }

    #[test]
    fn orphan_record_has_no_name() {
        let roster = roster();
        let entries = checked(&roster, &[CheckInRecord::pending(42)]);
        assert_eq!(entries[0].name, None);
    }
}
