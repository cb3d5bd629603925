//! Shared deterministic types for the check-in core.
//!
//! These types define stable contracts between the engine, the store, and the
//! presentation layer. They hold no I/O handles and carry no clock.

use serde::{Deserialize, Serialize};

/// Externally assigned roster identifier.
pub type IdentityId = i64;

/// Wall-clock format used for check-in timestamps (second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
}

impl Identity {
    pub fn new(id: IdentityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One successful check-in as persisted in the attendance file.
///
/// `timestamp` stays `None` until the first persist that sees the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    pub identifier: IdentityId,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CheckInRecord {
    /// Fresh record for an accepted check-in, not yet stamped.
    pub fn pending(identifier: IdentityId) -> Self {
        Self {
            identifier,
            checked: true,
            timestamp: None,
        }
    }

    pub fn is_stamped(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// Ordered, identifier-unique check-in records (insertion order = check-in order).
pub type RecordSet = Vec<CheckInRecord>;

/// Result of one check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Missing or blank input.
    EmptyInput,
    /// Input is not an integer identifier.
    InvalidFormat,
    /// Well-formed identifier that is not on the roster.
    UnknownIdentity,
    /// Identity already has a check-in record.
    Duplicate,
    /// New check-in; the caller must append `record` and persist.
    Accepted {
        identity: Identity,
        record: CheckInRecord,
    },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Stable machine-readable label, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::EmptyInput => "empty_input",
            Outcome::InvalidFormat => "invalid_format",
            Outcome::UnknownIdentity => "unknown_identity",
            Outcome::Duplicate => "duplicate",
            Outcome::Accepted { .. } => "accepted",
        }
    }
}

/// Cosmetic effect shown after an accepted check-in.
///
/// Selection is presentation-only and has no bearing on recorded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Celebration {
    Snow,
    Balloons,
}

impl Celebration {
    pub const ALL: [Celebration; 2] = [Celebration::Snow, Celebration::Balloons];
}
