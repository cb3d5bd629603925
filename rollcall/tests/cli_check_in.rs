//! CLI tests for `rollcall` commands.
//!
//! Spawns the rollcall binary against a temporary project and verifies exit
//! codes and rendered output.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use rollcall::core::types::IdentityId;
use rollcall::exit_codes;
use rollcall::test_support::TestProject;

const ROSTER: &[(IdentityId, &str)] = &[(1001, "Alice"), (1002, "Bob")];

fn rollcall(project: &TestProject, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rollcall"))
        .arg("--root")
        .arg(project.path())
        .args(args)
        .output()
        .expect("run rollcall")
}

#[test]
fn check_in_accepts_then_rejects_duplicate() {
    let project = TestProject::new(ROSTER).expect("project");

    let first = rollcall(&project, &["check-in", "1001"]);
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("Hello, Alice!"));
    assert!(stdout.contains("Not checked in (1):"));

    let second = rollcall(&project, &["check-in", "1001"]);
    assert_eq!(second.status.code(), Some(exit_codes::REJECTED));
    assert!(String::from_utf8_lossy(&second.stdout).contains("already checked in"));
}

#[test]
fn check_in_unknown_and_negative_ids_are_rejected() {
    let project = TestProject::new(ROSTER).expect("project");
    for id in ["9999", "-5", "abc"] {
        let output = rollcall(&project, &["check-in", id]);
        assert_eq!(output.status.code(), Some(exit_codes::REJECTED), "{id}");
        assert!(String::from_utf8_lossy(&output.stdout).contains("Unknown ID"));
    }
}

#[test]
fn corrupt_attendance_exits_with_corrupt_code() {
    let project = TestProject::new(ROSTER).expect("project");
    project.write_records_raw("{not json").expect("write");

    let output = rollcall(&project, &["list"]);
    assert_eq!(output.status.code(), Some(exit_codes::CORRUPT_STATE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("corrupt"));
}

#[test]
fn missing_roster_exits_with_roster_code() {
    let project = TestProject::new(ROSTER).expect("project");
    let output = rollcall(&project, &["--roster", "nope.csv", "status"]);
    assert_eq!(output.status.code(), Some(exit_codes::ROSTER_UNAVAILABLE));
}

#[test]
fn session_reads_stdin_until_eof() {
    let project = TestProject::new(ROSTER).expect("project");
    let mut child = Command::new(env!("CARGO_BIN_EXE_rollcall"))
        .arg("--root")
        .arg(project.path())
        .arg("session")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rollcall session");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"1002\n\n1001\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hello, Bob!"));
    assert!(stdout.contains("Please enter an ID"));
    assert!(stdout.contains("2 accepted, 1 rejected; 2/2 checked in"));

    let status = rollcall(&project, &["status"]);
    assert_eq!(String::from_utf8_lossy(&status.stdout).trim(), "2/2 checked in");
}

#[test]
fn check_in_against_workbook_roster() {
    let project = TestProject::new(ROSTER).expect("project");
    let workbook = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roster.xlsx");

    let output = rollcall(&project, &["--roster", workbook, "check-in", "1002"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Hello, Bob!"));
}
