//! Tracing setup, structured events, and solver observers.

pub mod events;
mod observer;

use std::sync::Once;

use cid_core::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

pub use observer::{RecordingObserver, TracingObserver};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `CID_LOG` environment variable for filtering and defaults to `info`.
/// Only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .init();
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
