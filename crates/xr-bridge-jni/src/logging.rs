//! Tracing subscriber setup for the loaded library.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use xr_bridge_common::LoggingConfig;

static INIT: Once = Once::new();

/// Build the filter: `RUST_LOG` wins over the configured directives.
pub fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber. Only the first call has an effect, and a
/// subscriber installed by the host process is left in place.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter(config));
        let installed = if config.json {
            registry.with(fmt::layer().json().with_ansi(false)).try_init()
        } else {
            registry.with(fmt::layer().with_ansi(false)).try_init()
        };

        if installed.is_err() {
            tracing::debug!("Global subscriber already set, using it");
        }
    });
}
