//! Log subscriber installation.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter. `RUST_LOG` is read when
/// it is unset.
pub const LOG_ENV: &str = "FORGE_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber. Safe to call more than once.
///
/// Without a filter in the environment only warnings and errors are shown.
/// Enable more with e.g. `FORGE_LOG=forge_codegen=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::new(directives))
            .try_init();
    });
}
