//! Diagnostic logging.
//!
//! Configure via the `ARBIFY_LOG` environment variable, using the usual
//! `EnvFilter` syntax:
//! - `ARBIFY_LOG=debug` - all debug logs
//! - `ARBIFY_LOG=arbify::hook=info` - output of the post-merge hook only
//!
//! Logs go to stderr so they never mix with command output.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "ARBIFY_LOG";

/// Default filter when `ARBIFY_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "arbify=debug" } else { "warn" }
}

/// Install the stderr subscriber. Safe to call more than once; only the
/// first call has an effect.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
