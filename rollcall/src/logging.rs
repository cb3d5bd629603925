//! Diagnostic tracing for rollcall.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. Replies and
//! listings go to stdout, so piping a session's output never mixes in
//! diagnostics.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber (compact, stderr, no timestamps).
///
/// Fails if a subscriber is already installed.
///
/// # Example
/// ```bash
/// RUST_LOG=rollcall=debug rollcall session
/// ```
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .compact(),
        )
        .try_init()
        .map_err(|err| anyhow!("install tracing subscriber: {err}"))
}
