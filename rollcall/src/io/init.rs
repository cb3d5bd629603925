//! Project layout and `.rollcall/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::info;

use super::config::{RollcallConfig, load_config, write_config};

/// Canonical paths for a project root.
#[derive(Debug, Clone)]
pub struct RollcallPaths {
    pub root: PathBuf,
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
}

impl RollcallPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let state_dir = root.join(".rollcall");
        Self {
            root: root.clone(),
            config_path: state_dir.join("config.toml"),
            state_dir,
        }
    }
}

/// Options for `init_project`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite an existing config.
    pub force: bool,
}

/// Command-line overrides layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub roster: Option<PathBuf>,
    pub records: Option<PathBuf>,
}

/// Fully resolved data file locations for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub roster_path: PathBuf,
    pub records_path: PathBuf,
}

/// Create `.rollcall/config.toml` with defaults in `root`.
///
/// Fails if the config already exists unless `options.force` is set.
pub fn init_project(root: &Path, options: &InitOptions) -> Result<RollcallPaths> {
    let paths = RollcallPaths::new(root);
    if paths.state_dir.exists() && !paths.state_dir.is_dir() {
        return Err(anyhow!("rollcall init: .rollcall exists but is not a directory"));
    }
    if paths.config_path.exists() && !options.force {
        return Err(anyhow!(
            "rollcall init: {} already exists (use --force to overwrite)",
            paths.config_path.display()
        ));
    }
    fs::create_dir_all(&paths.state_dir)
        .with_context(|| format!("create directory {}", paths.state_dir.display()))?;
    write_config(&paths.config_path, &RollcallConfig::default())?;
    info!(config = %paths.config_path.display(), "initialized project");
    Ok(paths)
}

/// Resolve roster and records paths from config plus overrides.
pub fn resolve_data_paths(root: &Path, overrides: &PathOverrides) -> Result<DataPaths> {
    let paths = RollcallPaths::new(root);
    let cfg = load_config(&paths.config_path).context("load .rollcall/config.toml")?;
    Ok(DataPaths {
        roster_path: overrides
            .roster
            .as_ref()
            .map(|path| root.join(path))
            .unwrap_or_else(|| cfg.roster_path_in(root)),
        records_path: overrides
            .records
            .as_ref()
            .map(|path| root.join(path))
            .unwrap_or_else(|| cfg.records_path_in(root)),
    })
}
