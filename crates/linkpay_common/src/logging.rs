//! Logging utilities for the linkpay application.
//!
//! Provides a standardized tracing setup shared by the backend binary and
//! integration tests.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// Call once at process startup. Subsequent calls are no-ops, so tests can
/// call this freely.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum log level.
///
/// RUST_LOG still takes precedence for targets it names.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("linkpay={}", level).parse().expect("valid directive"));

    // try_init: a subscriber may already be installed (tests, embedding).
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
