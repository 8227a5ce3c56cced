//! User activity event
//!
//! An event records that a user performed an action at a local date-time.
//! Events are immutable values; the store keys them on the
//! `(user_id, timestamp, event_type)` triple.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::format_local_datetime;

/// An immutable user activity event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// User who performed the action
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Local date-time of the action (no timezone)
    pub timestamp: NaiveDateTime,

    /// Kind of action, e.g. `login`
    #[serde(rename = "event")]
    pub event_type: String,
}

impl Event {
    /// Create a new event
    pub fn new(
        user_id: impl Into<String>,
        timestamp: NaiveDateTime,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp,
            event_type: event_type.into(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Event(user={}, ts={}, event={})",
            self.user_id,
            format_local_datetime(&self.timestamp),
            self.event_type
        )
    }
}
