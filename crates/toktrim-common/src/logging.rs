//! Global tracing initialization
//!
//! Safe to call multiple times - the subscriber is only installed once.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG` for filtering, defaulting to `info`. Tests and
/// binaries call this at startup; repeated calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .ok();
    });
}
