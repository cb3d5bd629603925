//! Attendance store: load/persist of the durable record set.
//!
//! The file is a JSON array of `{identifier, checked, timestamp}` objects.
//! Loading validates it against the bundled schema plus record invariants;
//! anything unreadable is a `CorruptStateError`, never an empty set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use jsonschema::validator_for;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::atomic::write_atomic;
use crate::core::invariants::validate_records;
use crate::core::stamping::stamp_pending;
use crate::core::types::{RecordSet, TIMESTAMP_FORMAT};
use crate::error::CorruptStateError;

const RECORDS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/records.v1.schema.json"
));

/// Owner of the durable attendance file for one session.
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    path: PathBuf,
}

impl AttendanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record set; a missing file yields an empty set.
    ///
    /// # Errors
    /// - `CorruptStateError` (inside `anyhow::Error`) when the content is not
    ///   a valid record set (including an empty or whitespace-only file).
    /// - Plain I/O errors when the file exists but cannot be read.
    pub fn load(&self) -> Result<RecordSet> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "attendance file missing; starting empty");
            return Ok(RecordSet::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("read attendance file {}", self.path.display()))?;
        let records = parse_records(&contents)
            .map_err(|reason| CorruptStateError::new(&self.path, reason))?;
        info!(path = %self.path.display(), records = records.len(), "attendance loaded");
        Ok(records)
    }

    /// Stamp pending records with the current local time, then replace the file.
    ///
    /// Returns the number of records stamped by this call.
    pub fn persist(&self, records: &mut RecordSet) -> Result<usize> {
        let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.persist_at(records, &now)
    }

    /// `persist` with an explicit timestamp for pending records.
    pub fn persist_at(&self, records: &mut RecordSet, timestamp: &str) -> Result<usize> {
        let stamped = stamp_pending(records, timestamp);
        let mut buf = serde_json::to_string_pretty(records).context("serialize records")?;
        buf.push('\n');
        write_atomic(&self.path, &buf)
            .with_context(|| format!("persist attendance file {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            stamped,
            "attendance persisted"
        );
        Ok(stamped)
    }

    /// Move a corrupt attendance file aside so a session can start empty.
    ///
    /// Returns the quarantine path. Fails if there is no file to move.
    pub fn quarantine(&self) -> Result<PathBuf> {
        if !self.path.exists() {
            return Err(anyhow!(
                "no attendance file to quarantine at {}",
                self.path.display()
            ));
        }
        let suffix = Local::now().format("%Y%m%d%H%M%S");
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(format!(".corrupt-{suffix}"));
        let target = self.path.with_file_name(name);
        fs::rename(&self.path, &target).with_context(|| {
            format!(
                "quarantine {} to {}",
                self.path.display(),
                target.display()
            )
        })?;
        warn!(from = %self.path.display(), to = %target.display(), "attendance file quarantined");
        Ok(target)
    }
}

/// Field names written by the legacy roll-call tool, mapped to current names.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("學號", "identifier"),
    ("已點名", "checked"),
    ("點名時間", "timestamp"),
];

/// Parse attendance JSON: syntax, legacy key names, schema, then record invariants.
fn parse_records(contents: &str) -> std::result::Result<RecordSet, String> {
    let mut value: Value =
        serde_json::from_str(contents).map_err(|err| format!("invalid json: {err}"))?;
    let renamed = rename_legacy_keys(&mut value);
    if renamed > 0 {
        info!(renamed, "attendance uses legacy field names; next persist rewrites them");
    }
    validate_schema(&value)?;
    let records: RecordSet =
        serde_json::from_value(value).map_err(|err| format!("deserialize records: {err}"))?;
    let errors = validate_records(&records);
    if !errors.is_empty() {
        return Err(format!("record invariants failed: {}", errors.join("; ")));
    }
    Ok(records)
}

/// Rename legacy fields in place; a record that already has the current name
/// keeps its legacy field, which the schema then rejects.
fn rename_legacy_keys(value: &mut Value) -> usize {
    let Some(items) = value.as_array_mut() else {
        return 0;
    };
    let mut renamed = 0;
    for item in items.iter_mut().filter_map(Value::as_object_mut) {
        for (legacy, current) in LEGACY_KEYS {
            if item.contains_key(*current) {
                continue;
            }
            if let Some(field) = item.remove(*legacy) {
                item.insert((*current).to_string(), field);
                renamed += 1;
            }
        }
    }
    renamed
}

fn validate_schema(value: &Value) -> std::result::Result<(), String> {
    let schema: Value =
        serde_json::from_str(RECORDS_SCHEMA).map_err(|err| format!("bundled schema: {err}"))?;
    let compiled = validator_for(&schema).map_err(|err| format!("invalid schema: {err}"))?;
    if compiled.is_valid(value) {
        return Ok(());
    }
    let messages = compiled
        .iter_errors(value)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    Err(format!("schema validation failed: {}", messages.join("; ")))
}
