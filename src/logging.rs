//! Tracing setup for the binary. Library code only emits events.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over the configured
/// level. Calling it twice is harmless.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},tapfeed={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
