//! Test-only helpers for building rosters and temporary projects.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::roster::Roster;
use crate::core::types::{Identity, IdentityId};
use crate::io::init::{DataPaths, InitOptions, PathOverrides, init_project, resolve_data_paths};

/// Build a roster from `(id, name)` pairs; panics on invalid input.
pub fn roster_of(entries: &[(IdentityId, &str)]) -> Roster {
    Roster::from_identities(
        entries
            .iter()
            .map(|(id, name)| Identity::new(*id, *name))
            .collect(),
    )
    .expect("valid test roster")
}

/// Render `(id, name)` pairs as roster CSV.
pub fn roster_csv(entries: &[(IdentityId, &str)]) -> String {
    let mut csv = String::from("id,name\n");
    for (id, name) in entries {
        csv.push_str(&format!("{id},{name}\n"));
    }
    csv
}

/// Temporary project root with `.rollcall/config.toml` and a roster file.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Initialize a project whose default roster holds `entries`.
    pub fn new(entries: &[(IdentityId, &str)]) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        init_project(dir.path(), &InitOptions { force: false })?;
        let project = Self { dir };
        project.write_roster(entries)?;
        Ok(project)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_paths(&self) -> Result<DataPaths> {
        resolve_data_paths(self.path(), &PathOverrides::default())
    }

    pub fn records_path(&self) -> Result<PathBuf> {
        Ok(self.data_paths()?.records_path)
    }

    pub fn write_roster(&self, entries: &[(IdentityId, &str)]) -> Result<()> {
        let roster_path = self.data_paths()?.roster_path;
        fs::write(&roster_path, roster_csv(entries))
            .with_context(|| format!("write roster {}", roster_path.display()))
    }

    pub fn write_records_raw(&self, contents: &str) -> Result<()> {
        let records_path = self.records_path()?;
        fs::write(&records_path, contents)
            .with_context(|| format!("write records {}", records_path.display()))
    }
}
