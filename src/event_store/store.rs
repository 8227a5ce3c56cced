//! Event Store - concurrent in-memory event index
//!
//! Events are indexed on three levels: `user_id -> timestamp -> event_type`.
//! The top level is a sharded `DashMap`, each user owns a [`UserPartition`]
//! guarded by its own lock.
//!
//! The triple `(user_id, timestamp, event_type)` is the identity of a stored
//! event: inserting the same triple twice keeps one event, the latest. This
//! makes the store an index rather than an event log. Exact multiplicity of
//! duplicate records is traded for constant-time overwrite and simple keying.
//!
//! Queries are weakly consistent. They snapshot the set of partitions first
//! and then visit them one at a time, so a racing insert may or may not be
//! seen, but no event is ever seen twice or half-written.

use std::sync::Arc;

use chrono::NaiveDateTime;
use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

use super::partition::UserPartition;
use crate::types::Event;

/// Concurrent, in-memory store of user activity events
#[derive(Debug, Default)]
pub struct EventStore {
    users: DashMap<String, Arc<UserPartition>>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event.
    ///
    /// An existing event with the same `(user_id, timestamp, event_type)` is
    /// replaced. Returns `true` when the triple was not stored before.
    pub fn insert(&self, event: Event) -> bool {
        debug!("Inserting {} in the store", event);
        let partition = self.partition_or_create(&event.user_id);
        partition.insert(event)
    }

    /// Remove every event.
    ///
    /// Meant for quiescent use (tests, reset). Readers racing with a clear
    /// may observe it only partially.
    pub fn clear(&self) {
        self.users.clear();
        debug!("All store events have been deleted");
    }

    /// Lazily yield every event with `from <= timestamp <= to` that matches
    /// the optional event type and user filters.
    ///
    /// Order is unspecified. An inverted range (`from > to`) yields nothing.
    pub fn find_events<'a>(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&'a str>,
        user_id: Option<&str>,
    ) -> impl Iterator<Item = Event> + 'a {
        self.partitions(user_id)
            .into_iter()
            .flat_map(move |partition| partition.collect_range(from, to, event_type))
    }

    /// Lazily yield each user with at least one event in `[from, to]`
    /// matching the optional event type. Every user appears once.
    pub fn find_distinct_users<'a>(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&'a str>,
    ) -> impl Iterator<Item = String> + 'a {
        self.partitions(None)
            .into_iter()
            .filter(move |partition| partition.any_in_range(from, to, event_type))
            .map(|partition| partition.user_id().to_string())
    }

    /// Check whether the user has this event type at any timestamp
    pub fn exists_by_user_and_event(&self, user_id: &str, event_type: &str) -> bool {
        self.users
            .get(user_id)
            .map(|partition| Arc::clone(partition.value()))
            .is_some_and(|partition| partition.contains_event_type(event_type))
    }

    /// Count matching events, scanning partitions in parallel.
    ///
    /// Same result as `find_events(..).count()` without cloning events.
    pub fn par_count_events(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
        user_id: Option<&str>,
    ) -> usize {
        self.partitions(user_id)
            .par_iter()
            .map(|partition| partition.count_range(from, to, event_type))
            .sum()
    }

    /// Total number of stored events
    pub fn len(&self) -> usize {
        self.partitions(None).iter().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of users with at least one event
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Resolve the partition for a user, creating it on first insert.
    ///
    /// The shard guard is dropped before the caller locks the partition,
    /// so inserts for different users never wait on each other's writes.
    fn partition_or_create(&self, user_id: &str) -> Arc<UserPartition> {
        if let Some(partition) = self.users.get(user_id) {
            return Arc::clone(partition.value());
        }

        let entry = self
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(UserPartition::new(user_id)));
        Arc::clone(entry.value())
    }

    /// Snapshot the partitions a query has to visit
    fn partitions(&self, user_id: Option<&str>) -> Vec<Arc<UserPartition>> {
        match user_id {
            Some(id) => self
                .users
                .get(id)
                .map(|partition| vec![Arc::clone(partition.value())])
                .unwrap_or_default(),
            None => self
                .users
                .iter()
                .map(|partition| Arc::clone(partition.value()))
                .collect(),
        }
    }
}
