//! Per-user partition of the event index
//!
//! A partition holds every event of one user, ordered by timestamp and then
//! keyed by event type. All access goes through a single `RwLock`, so an
//! event is always inserted and observed whole.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use parking_lot::RwLock;

use crate::types::Event;

/// timestamp -> event type -> event
type TimeIndex = BTreeMap<NaiveDateTime, HashMap<String, Event>>;

/// Events of a single user
#[derive(Debug)]
pub struct UserPartition {
    user_id: String,
    index: RwLock<TimeIndex>,
}

impl UserPartition {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            index: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Insert an event, replacing any event with the same timestamp and type.
    ///
    /// Returns `true` if the `(timestamp, event_type)` slot was empty.
    pub fn insert(&self, event: Event) -> bool {
        let mut index = self.index.write();
        index
            .entry(event.timestamp)
            .or_default()
            .insert(event.event_type.clone(), event)
            .is_none()
    }

    /// Clone every event in `[from, to]` matching the optional type filter
    pub fn collect_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
    ) -> Vec<Event> {
        if from > to {
            return Vec::new();
        }

        let index = self.index.read();
        let slots = index.range(from..=to).map(|(_, slot)| slot);

        match event_type {
            Some(ty) => slots.filter_map(|slot| slot.get(ty)).cloned().collect(),
            None => slots.flat_map(|slot| slot.values()).cloned().collect(),
        }
    }

    /// Count events in `[from, to]` without cloning them
    pub fn count_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
    ) -> usize {
        if from > to {
            return 0;
        }

        let index = self.index.read();
        let slots = index.range(from..=to).map(|(_, slot)| slot);

        match event_type {
            Some(ty) => slots.filter(|slot| slot.contains_key(ty)).count(),
            None => slots.map(HashMap::len).sum(),
        }
    }

    /// Check whether at least one event lies in `[from, to]`
    pub fn any_in_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        event_type: Option<&str>,
    ) -> bool {
        if from > to {
            return false;
        }

        let index = self.index.read();
        let mut slots = index.range(from..=to).map(|(_, slot)| slot);

        match event_type {
            Some(ty) => slots.any(|slot| slot.contains_key(ty)),
            None => slots.any(|slot| !slot.is_empty()),
        }
    }

    /// Check whether any timestamp carries this event type
    pub fn contains_event_type(&self, event_type: &str) -> bool {
        self.index
            .read()
            .values()
            .any(|slot| slot.contains_key(event_type))
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.index.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
