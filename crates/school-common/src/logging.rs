//! Logging setup.
//!
//! Log lines go to stderr so stdout stays free for command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV: &str = "SCHOOL_DEBUG";

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some()
}

/// Default filter directive when `RUST_LOG` is unset.
fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(is_debug_enabled())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
