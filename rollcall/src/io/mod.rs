//! I/O helpers: configuration, roster source, and attendance storage.

pub mod atomic;
pub mod config;
pub mod init;
pub mod record_store;
pub mod roster_source;
