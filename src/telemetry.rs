//! Diagnostic logging for the command line tool.
//!
//! Library code emits `tracing` events only. The binary installs a formatting
//! subscriber that writes to stderr, so report output on stdout stays clean
//! and machine-readable.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the event filter from `RUST_LOG`, falling back to `default_filter`.
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the stderr subscriber.
///
/// Does nothing when a global subscriber is already installed.
pub fn init_logging(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // A concurrent installer may win the race; its subscriber is kept.
    let _installed = fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
}
