//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Fallback when both `RUST_LOG` and the configured level fail to parse.
const FALLBACK_FILTER: &str = "info";

/// Installs the global subscriber: JSON lines in production, human-readable
/// output otherwise. `RUST_LOG` overrides `server.log_level`.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TryInitError> {
    let filter = env_filter(&config.log_level);
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}
