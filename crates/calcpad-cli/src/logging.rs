//! Log output
//!
//! Library events are emitted through `tracing`; the binary installs one
//! fmt subscriber writing to stderr so stdout stays clean for results.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "RUST_LOG";

/// Builds the log filter: `RUST_LOG` wins, otherwise the verbosity level
#[must_use]
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_level()))
}

/// Installs the global subscriber. Returns false when one was already set.
pub fn init(verbosity: Verbosity, color: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .try_init()
        .is_ok()
}
