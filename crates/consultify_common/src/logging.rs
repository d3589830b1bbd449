// --- File: crates/consultify_common/src/logging.rs ---
//! Logging utilities for the Consultify application.
//!
//! One place to initialize the tracing subscriber so every binary and test
//! harness formats and filters log output the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default level (INFO).
///
/// Call once at process start. `RUST_LOG` still wins for targets it names.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum level for
/// the `consultify` targets.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("consultify={}", level).parse().unwrap());

    // try_init so tests that race to initialize do not panic
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
