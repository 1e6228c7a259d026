//! Logging setup shared by the command-line tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr, at `default` level unless `RUST_LOG` says otherwise.
pub fn init(default: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env()
              .unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
