//! Stable exit codes for rollcall CLI commands.

/// Command succeeded (or the check-in was accepted).
pub const OK: i32 = 0;
/// Command failed for a reason not covered below (I/O, config, usage).
pub const INVALID: i32 = 1;
/// `rollcall check-in` was rejected (empty, unknown, or duplicate identifier).
pub const REJECTED: i32 = 2;
/// The attendance file exists but is corrupt.
pub const CORRUPT_STATE: i32 = 3;
/// The roster source is missing or malformed.
pub const ROSTER_UNAVAILABLE: i32 = 4;
