//! Record-set invariants not expressible via JSON Schema.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::core::roster::Roster;
use crate::core::types::{CheckInRecord, IdentityId, TIMESTAMP_FORMAT};

/// Check semantic invariants of a loaded record set:
/// - No duplicate identifiers
/// - `checked` is always true
/// - Timestamps, when present, are real `YYYY-MM-DD HH:MM:SS` date-times
pub fn validate_records(records: &[CheckInRecord]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (position, record) in records.iter().enumerate() {
        let at = position + 1;
        if !seen.insert(record.identifier) {
            errors.push(format!("record {at}: duplicate identifier {}", record.identifier));
        }
        if !record.checked {
            errors.push(format!(
                "record {at}: identifier {} has checked=false",
                record.identifier
            ));
        }
        if let Some(timestamp) = &record.timestamp {
            if NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_err() {
                errors.push(format!("record {at}: malformed timestamp '{timestamp}'"));
            }
        }
    }
    errors
}

/// Identifiers in the record set that the roster does not know.
///
/// Not fatal: the roster may have been edited between sessions.
pub fn orphaned_identifiers(roster: &Roster, records: &[CheckInRecord]) -> Vec<IdentityId> {
    records
        .iter()
        .map(|record| record.identifier)
        .filter(|id| !roster.contains(*id))
        .collect()
}
