//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this twice is
/// harmless; the second call is ignored.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
