//! Rollcall configuration stored under `.rollcall/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::atomic::write_atomic;

/// Rollcall configuration (TOML).
///
/// Intended to be edited by humans. Missing fields fall back to defaults;
/// relative paths resolve against the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RollcallConfig {
    /// Roster source (`.csv` or `.json`).
    pub roster_path: PathBuf,

    /// Durable attendance file (JSON array of check-in records).
    pub records_path: PathBuf,
}

impl Default for RollcallConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("roster.csv"),
            records_path: PathBuf::from("checked_students.json"),
        }
    }
}

impl RollcallConfig {
    pub fn validate(&self) -> Result<()> {
        if self.roster_path.as_os_str().is_empty() {
            return Err(anyhow!("roster_path must not be empty"));
        }
        if self.records_path.as_os_str().is_empty() {
            return Err(anyhow!("records_path must not be empty"));
        }
        Ok(())
    }

    /// Roster path resolved against `root`.
    pub fn roster_path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.roster_path)
    }

    /// Records path resolved against `root`.
    pub fn records_path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.records_path)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RollcallConfig::default()`.
pub fn load_config(path: &Path) -> Result<RollcallConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing; using defaults");
        let cfg = RollcallConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RollcallConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RollcallConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}
