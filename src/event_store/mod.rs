//! Event Store Module
//!
//! This module provides the concurrent in-memory index of user events:
//! - `EventStore`: sharded map of users, insert / clear / range queries
//! - `UserPartition`: one user's events ordered by timestamp
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌───────────────────┐    ┌───────────────────────────┐
//! │ Loader   │───►│ DashMap shard     │───►│ partition write lock      │
//! │ insert() │    │ get-or-create user│    │ ts -> event_type -> Event │
//! └──────────┘    └───────────────────┘    └───────────────────────────┘
//!
//! Read Path:
//! ┌──────────────┐    ┌──────────────────────┐    ┌──────────────────┐
//! │ Query engine │───►│ snapshot partitions  │───►│ per-partition    │
//! │ (service)    │    │ (Arc clones)         │    │ read + range scan│
//! └──────────────┘    └──────────────────────┘    └──────────────────┘
//! ```

mod partition;
mod store;

pub use partition::UserPartition;
pub use store::EventStore;
