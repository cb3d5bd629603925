//! Attendance check-in CLI.
//!
//! Reads the roster and attendance file named in `.rollcall/config.toml`,
//! records check-ins one at a time, and prints the checked and unchecked
//! listings after every submission.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rollcall::error::{CorruptStateError, RosterLoadError};
use rollcall::exit_codes;
use rollcall::interactive::{run_loop, submit_and_render};
use rollcall::io::init::{InitOptions, PathOverrides, init_project, resolve_data_paths};
use rollcall::logging;
use rollcall::render::render_listings;
use rollcall::session::{OpenOptions, Session};

#[derive(Parser)]
#[command(name = "rollcall", version, about = "Attendance check-in tracker")]
struct Cli {
    /// Project directory (contains .rollcall/).
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Roster file, overriding config (relative to --root).
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Attendance file, overriding config (relative to --root).
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.rollcall/config.toml` with defaults.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Record one check-in and print both listings.
    CheckIn {
        /// Identifier to check in.
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[command(flatten)]
        open: OpenArgs,
    },
    /// Print checked and unchecked listings.
    List,
    /// Print checked/total counts.
    Status,
    /// Read identifiers from stdin, one per line, until EOF or `:q`.
    Session {
        #[command(flatten)]
        open: OpenArgs,
    },
}

#[derive(Args, Default)]
struct OpenArgs {
    /// Move a corrupt attendance file aside and start empty.
    #[arg(long)]
    quarantine_corrupt: bool,
}

impl OpenArgs {
    fn options(&self) -> OpenOptions {
        OpenOptions {
            quarantine_corrupt: self.quarantine_corrupt,
        }
    }
}

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{:#}", err);
    }
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let overrides = PathOverrides {
        roster: cli.roster.clone(),
        records: cli.records.clone(),
    };
    match &cli.command {
        Command::Init { force } => cmd_init(&cli.root, *force),
        Command::CheckIn { id, open } => cmd_check_in(&cli.root, &overrides, id, &open.options()),
        Command::List => cmd_list(&cli.root, &overrides),
        Command::Status => cmd_status(&cli.root, &overrides),
        Command::Session { open } => cmd_session(&cli.root, &overrides, &open.options()),
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_project(root, &InitOptions { force })?;
    println!("wrote {}", paths.config_path.display());
    Ok(exit_codes::OK)
}

fn open_session(
    root: &Path,
    overrides: &PathOverrides,
    options: &OpenOptions,
) -> Result<Session> {
    let paths = resolve_data_paths(root, overrides)?;
    Session::open(&paths, options)
}

fn cmd_check_in(
    root: &Path,
    overrides: &PathOverrides,
    id: &str,
    options: &OpenOptions,
) -> Result<i32> {
    let mut session = open_session(root, overrides, options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = submit_and_render(&mut session, Some(id), &mut out, &mut rand::thread_rng())?;
    if outcome.is_accepted() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::REJECTED)
    }
}

fn cmd_list(root: &Path, overrides: &PathOverrides) -> Result<i32> {
    let session = open_session(root, overrides, &OpenOptions::default())?;
    print!("{}", render_listings(&session.listings()));
    io::stdout().flush()?;
    Ok(exit_codes::OK)
}

fn cmd_status(root: &Path, overrides: &PathOverrides) -> Result<i32> {
    let session = open_session(root, overrides, &OpenOptions::default())?;
    let status = session.status();
    println!("{}/{} checked in", status.checked, status.total);
    Ok(exit_codes::OK)
}

fn cmd_session(
    root: &Path,
    overrides: &PathOverrides,
    options: &OpenOptions,
) -> Result<i32> {
    let mut session = open_session(root, overrides, options)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run_loop(&mut session, stdin.lock(), &mut out, &mut rand::thread_rng())?;
    let status = session.status();
    writeln!(
        out,
        "{} accepted, {} rejected; {}/{} checked in",
        summary.accepted, summary.rejected, status.checked, status.total
    )?;
    Ok(exit_codes::OK)
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<CorruptStateError>().is_some() {
        exit_codes::CORRUPT_STATE
    } else if err.downcast_ref::<RosterLoadError>().is_some() {
        exit_codes::ROSTER_UNAVAILABLE
    } else {
        exit_codes::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_in() {
        let cli = Cli::parse_from(["rollcall", "check-in", "1001"]);
        assert!(matches!(
            cli.command,
            Command::CheckIn { ref id, open: OpenArgs { quarantine_corrupt: false } } if id == "1001"
        ));
    }

    #[test]
    fn parse_session_with_quarantine_and_global_root() {
        let cli = Cli::parse_from(["rollcall", "session", "--quarantine-corrupt", "--root", "/tmp/x"]);
        assert!(matches!(
            cli.command,
            Command::Session { open: OpenArgs { quarantine_corrupt: true } }
        ));
        assert_eq!(cli.root, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn typed_errors_map_to_exit_codes() {
        let corrupt = anyhow::Error::new(CorruptStateError::new("a.json", "bad"));
        assert_eq!(exit_code_for(&corrupt), exit_codes::CORRUPT_STATE);
        let roster = anyhow::Error::new(RosterLoadError::new("r.csv", "missing")).context("open");
        assert_eq!(exit_code_for(&roster), exit_codes::ROSTER_UNAVAILABLE);
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), exit_codes::INVALID);
    }
}
