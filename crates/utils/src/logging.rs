use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber. Falls back to `default_directive`
/// when `RUST_LOG` is unset or unparsable.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
