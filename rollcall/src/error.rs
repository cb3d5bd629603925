//! Typed startup failures.
//!
//! Both travel inside `anyhow::Error`; `main` recovers them with
//! `downcast_ref` to pick an exit code.

use std::path::PathBuf;

use thiserror::Error;

/// The roster source is missing or malformed. Fatal: nothing can be validated.
#[derive(Debug, Error)]
#[error("roster {}: {reason}", path.display())]
pub struct RosterLoadError {
    pub path: PathBuf,
    pub reason: String,
}

impl RosterLoadError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// The attendance file exists but cannot be read back as a record set.
///
/// Starting empty would silently drop prior check-ins, so callers must
/// refuse to start or quarantine the file explicitly.
#[derive(Debug, Error)]
#[error("attendance file {} is corrupt: {reason}", path.display())]
pub struct CorruptStateError {
    pub path: PathBuf,
    pub reason: String,
}

impl CorruptStateError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
