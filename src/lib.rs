//! Events Aggregation Server
//!
//! Ingests user activity events `(user_id, timestamp, event_type)` and
//! answers three queries over them: total event count, distinct-user count
//! and existence of a `(user, event)` pair.
//!
//! # Features
//!
//! - **Concurrent store**: sharded user map with per-user partition locks
//! - **Range queries**: timestamp-ordered partitions, inclusive ranges
//! - **Bulk loading**: tab-separated files loaded in parallel at startup
//! - **HTTP API**: `/count`, `/count_distinct_users`, `/exists`
//!
//! # Modules
//!
//! - `types`: Event value type and error taxonomy
//! - `event_store`: Concurrent in-memory event index
//! - `service`: Query engine over the store
//! - `loader`: File ingestion
//! - `api`: Axum router and handlers
//! - `config`: Environment configuration
//! - `logging`: Tracing subscriber setup
//! - `utils`: Date-time helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use events_aggregation::{EventService, EventStore, Event};
//! use events_aggregation::utils::parse_local_datetime;
//!
//! let store = Arc::new(EventStore::new());
//! let ts = parse_local_datetime("2024-01-01T10:00:00").unwrap();
//! store.insert(Event::new("user1", ts, "login"));
//!
//! let service = EventService::new(store);
//! assert!(service.event_exists("user1", "login"));
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod loader;
pub mod logging;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::AppConfig;
pub use event_store::EventStore;
pub use loader::{EventLoader, LoadReport};
pub use service::EventService;
pub use types::{Event, EventsError, EventsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
