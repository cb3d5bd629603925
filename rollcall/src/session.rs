//! Session context: roster + record set + store for one process lifetime.
//!
//! `Session::submit` is the only path that mutates attendance. It runs the
//! pure decision from [`crate::core::engine`], then appends and persists on
//! acceptance before returning.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::engine::attempt;
use crate::core::invariants::orphaned_identifiers;
use crate::core::listing::{Listings, listings};
use crate::core::roster::Roster;
use crate::core::types::{CheckInRecord, Outcome};
use crate::error::CorruptStateError;
use crate::io::init::DataPaths;
use crate::io::record_store::AttendanceStore;
use crate::io::roster_source::load_roster;

/// Options for `Session::open`.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Move a corrupt attendance file aside and start empty instead of failing.
    pub quarantine_corrupt: bool,
}

/// Checked/total counts for a quick status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub checked: usize,
    pub total: usize,
}

/// Live session state.
#[derive(Debug)]
pub struct Session {
    roster: Roster,
    records: Vec<CheckInRecord>,
    store: AttendanceStore,
}

impl Session {
    pub fn new(roster: Roster, records: Vec<CheckInRecord>, store: AttendanceStore) -> Self {
        Self {
            roster,
            records,
            store,
        }
    }

    /// Load roster and attendance from disk.
    ///
    /// Roster problems are always fatal. A corrupt attendance file is fatal
    /// unless `options.quarantine_corrupt` is set.
    pub fn open(paths: &DataPaths, options: &OpenOptions) -> Result<Self> {
        let roster = load_roster(&paths.roster_path)?;
        let store = AttendanceStore::new(&paths.records_path);
        let records = match store.load() {
            Ok(records) => records,
            Err(err) if options.quarantine_corrupt && err.is::<CorruptStateError>() => {
                warn!(error = %err, "starting with an empty record set");
                store.quarantine().context("quarantine corrupt attendance file")?;
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let orphans = orphaned_identifiers(&roster, &records);
        if !orphans.is_empty() {
            warn!(?orphans, "attendance contains identifiers missing from roster");
        }
        info!(
            roster = roster.len(),
            checked = records.len(),
            "session opened"
        );
        Ok(Self::new(roster, records, store))
    }

    /// Process one check-in attempt end to end.
    ///
    /// On `Accepted` the record is appended and persisted before returning;
    /// the returned record carries its assigned timestamp. If persisting
    /// fails the append is withdrawn so memory never runs ahead of disk.
    pub fn submit(&mut self, input: Option<&str>) -> Result<Outcome> {
        let outcome = attempt(input, &self.roster, &self.records);
        debug!(input = ?input, outcome = outcome.label(), "check-in attempt");
        let (identity, record) = match outcome {
            Outcome::Accepted { identity, record } => (identity, record),
            rejected => return Ok(rejected),
        };

        self.records.push(record);
        if let Err(err) = self.store.persist(&mut self.records) {
            self.records.pop();
            return Err(err.context(format!("record check-in for {}", identity.id)));
        }
        let record = self
            .records
            .last()
            .cloned()
            .context("record set empty after append")?;
        info!(id = identity.id, timestamp = ?record.timestamp, "check-in accepted");
        Ok(Outcome::Accepted { identity, record })
    }

    pub fn listings(&self) -> Listings {
        listings(&self.roster, &self.records)
    }

    pub fn status(&self) -> Status {
        Status {
            checked: self.records.len(),
            total: self.roster.len(),
        }
    }

    pub fn records(&self) -> &[CheckInRecord] {
        &self.records
    }

    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }
}
