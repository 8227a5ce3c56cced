//! Shared application state for HTTP handlers

use std::sync::Arc;

use crate::event_store::EventStore;
use crate::service::EventService;

/// State handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query engine over the shared store
    pub service: EventService,
}

impl AppState {
    /// Create a new AppState over the given store
    pub fn new(store: Arc<EventStore>) -> Self {
        Self {
            service: EventService::new(store),
        }
    }
}
