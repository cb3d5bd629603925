//! Check-in decision function.
//!
//! `attempt` never mutates the record set and performs no I/O. On
//! `Outcome::Accepted` it hands back the record the caller must append
//! before persisting.

use std::num::IntErrorKind;

use crate::core::roster::Roster;
use crate::core::types::{CheckInRecord, IdentityId, Outcome};

/// Decide the outcome of one check-in attempt.
///
/// Validation order (first match wins): empty input, identifier shape,
/// roster membership, existing check-in.
pub fn attempt(input: Option<&str>, roster: &Roster, records: &[CheckInRecord]) -> Outcome {
    let raw = match input.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Outcome::EmptyInput,
    };

    let id = match parse_identifier(raw) {
        Ok(id) => id,
        // Integer-shaped but outside the id range: cannot be on any roster.
        Err(IdentifierError::OutOfRange) => return Outcome::UnknownIdentity,
        Err(IdentifierError::Malformed) => return Outcome::InvalidFormat,
    };

    let identity = match roster.get(id) {
        Some(identity) => identity,
        None => return Outcome::UnknownIdentity,
    };

    if is_checked(records, id) {
        return Outcome::Duplicate;
    }

    Outcome::Accepted {
        identity: identity.clone(),
        record: CheckInRecord::pending(id),
    }
}

/// Why a raw identifier failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// Not an integer at all.
    Malformed,
    /// An integer too large (or small) for `IdentityId`.
    OutOfRange,
}

/// Parse a trimmed identifier into the roster's integer id type.
pub fn parse_identifier(raw: &str) -> Result<IdentityId, IdentifierError> {
    raw.parse::<IdentityId>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IdentifierError::OutOfRange,
        _ => IdentifierError::Malformed,
    })
}

/// True if `id` already has a check-in record.
pub fn is_checked(records: &[CheckInRecord], id: IdentityId) -> bool {
    records.iter().any(|record| record.identifier == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Identity;

    fn roster() -> Roster {
        Roster::from_identities(vec![
            Identity::new(1001, "Alice"),
            Identity::new(1002, "Bob"),
        ])
        .expect("roster")
    }

    #[test]
    fn missing_and_blank_input_is_empty() {
        let roster = roster();
        assert_eq!(attempt(None, &roster, &[]), Outcome::EmptyInput);
        assert_eq!(attempt(Some(""), &roster, &[]), Outcome::EmptyInput);
        assert_eq!(attempt(Some("   "), &roster, &[]), Outcome::EmptyInput);
    }

    #[test]
    fn non_integer_input_is_invalid_format() {
        let roster = roster();
        for raw in ["abc", "10.5", "1001x", "0x3e9"] {
            assert_eq!(attempt(Some(raw), &roster, &[]), Outcome::InvalidFormat, "{raw}");
        }
    }

    #[test]
    fn overflowing_integer_is_unknown_identity() {
        let roster = roster();
        for raw in ["99999999999999999999", "-99999999999999999999"] {
            assert_eq!(attempt(Some(raw), &roster, &[]), Outcome::UnknownIdentity, "{raw}");
        }
        assert_eq!(
            parse_identifier("99999999999999999999"),
            Err(IdentifierError::OutOfRange)
        );
        assert_eq!(parse_identifier("12a"), Err(IdentifierError::Malformed));
    }

    #[test]
    fn unknown_identity_wins_over_duplicate_check() {
        let roster = roster();
        let records = vec![CheckInRecord::pending(9999)];
        assert_eq!(
            attempt(Some("9999"), &roster, &records),
            Outcome::UnknownIdentity
        );
    }

    #[test]
    fn accepted_returns_pending_record_and_leaves_input_untouched() {
        let roster = roster();
        let records = Vec::new();
        let outcome = attempt(Some(" 1001 "), &roster, &records);
        assert_eq!(
            outcome,
            Outcome::Accepted {
                identity: Identity::new(1001, "Alice"),
                record: CheckInRecord::pending(1001),
            }
        );
        assert!(records.is_empty());
    }

    #[test]
    fn second_attempt_is_duplicate() {
        let roster = roster();
        let records = vec![CheckInRecord::pending(1002)];
        assert_eq!(attempt(Some("1002"), &roster, &records), Outcome::Duplicate);
    }
}
