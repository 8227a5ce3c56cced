//! Events Aggregation Server - Binary Entry Point
//!
//! Loads event files from the configured data directory, then serves the
//! query API until Ctrl+C.

use std::sync::Arc;

use tracing::{info, warn};

use events_aggregation::api::{self, AppState};
use events_aggregation::config::AppConfig;
use events_aggregation::event_store::EventStore;
use events_aggregation::loader::EventLoader;
use events_aggregation::logging::init_logging;
use events_aggregation::types::EventsResult;
use events_aggregation::{NAME, VERSION};

#[tokio::main]
async fn main() -> EventsResult<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config);
    info!("{} v{} starting", NAME, VERSION);

    let store = Arc::new(EventStore::new());

    let loader = EventLoader::new(Arc::clone(&store));
    loader.load_dir(&config.data_dir).await?;
    info!(
        "Store ready: {} events from {} users",
        store.len(),
        store.user_count()
    );

    let state = Arc::new(AppState::new(store));
    api::serve(config.bind_addr()?, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
