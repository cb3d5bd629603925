//! Deterministic, pure logic for check-in decisions.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! roster and record data and return deterministic outputs suitable for tests.

pub mod engine;
pub mod invariants;
pub mod listing;
pub mod roster;
pub mod stamping;
pub mod types;
