//! Attendance check-in tracker.
//!
//! A session validates check-in attempts against a fixed roster, records at
//! most one check-in per identity, and keeps the record set durable across
//! restarts. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (decision, listings, invariants,
//!   timestamp stamping). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, roster source, attendance
//!   file).
//!
//! [`session`] ties the two together: it owns the in-memory state and is the
//! only place that appends and persists. [`render`] and [`interactive`] are
//! the text front end used by the `rollcall` binary.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod interactive;
pub mod io;
pub mod logging;
pub mod render;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
