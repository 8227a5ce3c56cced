//! Logging initialization

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` syntax is accepted in `config.log_filter`; an invalid
/// directive falls back to `info`. Calling this twice is a no-op.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        debug!("Logging initialized with filter: {}", config.log_filter);
    }
}
