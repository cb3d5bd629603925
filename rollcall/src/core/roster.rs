//! In-memory roster: the closed set of valid identities for a session.

use std::collections::HashMap;

use crate::core::types::{Identity, IdentityId};

/// Roster in source order with an identifier index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    identities: Vec<Identity>,
    index: HashMap<IdentityId, usize>,
}

impl Roster {
    /// Build a roster, rejecting duplicate identifiers and blank names.
    ///
    /// Errors are collected rather than short-circuited so a bad source file
    /// can be fixed in one pass.
    pub fn from_identities(identities: Vec<Identity>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let mut index = HashMap::with_capacity(identities.len());
        for (position, identity) in identities.iter().enumerate() {
            if identity.name.trim().is_empty() {
                errors.push(format!("row {}: id {} has a blank name", position + 1, identity.id));
            }
            if let Some(first) = index.insert(identity.id, position) {
                errors.push(format!(
                    "row {}: duplicate id {} (first seen at row {})",
                    position + 1,
                    identity.id,
                    first + 1
                ));
                index.insert(identity.id, first);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self { identities, index })
    }

    pub fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.index.get(&id).map(|&position| &self.identities[position])
    }

    pub fn contains(&self, id: IdentityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn name_of(&self, id: IdentityId) -> Option<&str> {
        self.get(id).map(|identity| identity.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_preserves_source_order() {
        let roster = Roster::from_identities(vec![
            Identity::new(1002, "Bob"),
            Identity::new(1001, "Alice"),
        ])
        .expect("roster");
        let ids: Vec<IdentityId> = roster.iter().map(|identity| identity.id).collect();
        assert_eq!(ids, vec![1002, 1001]);
        assert_eq!(roster.name_of(1001), Some("Alice"));
        assert!(!roster.contains(9999));
    }

    #[test]
    fn duplicate_ids_and_blank_names_are_reported_together() {
        let errors = Roster::from_identities(vec![
            Identity::new(1, "A"),
            Identity::new(1, "B"),
            Identity::new(2, "  "),
        ])
        .expect_err("invalid roster");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|err| err.contains("duplicate id 1")));
        assert!(errors.iter().any(|err| err.contains("blank name")));
    }
}
