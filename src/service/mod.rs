//! Event Service - query engine
//!
//! Stateless compositions over the [`EventStore`]: they only turn the
//! store's lazy sequences into counts and booleans, so query logic can be
//! tested without the HTTP layer.

mod query;

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::event_store::EventStore;

/// Query engine over a shared event store
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<EventStore>,
}

impl EventService {
    /// Create a service over an existing store
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }
}

// Query operations delegate to the `query` submodule
impl EventService {
    /// Number of events with `from <= timestamp <= to` matching the optional
    /// event type and user filters. An inverted range counts `0`.
    pub fn count_events(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
        user_id: Option<&str>,
    ) -> u64 {
        query::count_events(self, from, to, event_type, user_id)
    }

    /// Number of distinct users with a matching event in the range
    pub fn count_distinct_users(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
    ) -> u64 {
        query::count_distinct_users(self, from, to, event_type)
    }

    /// Whether the user has this event type at any timestamp
    pub fn event_exists(&self, user_id: &str, event_type: &str) -> bool {
        query::event_exists(self, user_id, event_type)
    }
}
