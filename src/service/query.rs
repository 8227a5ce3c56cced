//! Query operations over the event store
//!
//! Counting uses parallel partition scans once the user population is
//! large enough for rayon to pay off.

use chrono::NaiveDateTime;

use super::EventService;

/// Threshold for using parallel scans (user partitions count)
const PARALLEL_SCAN_THRESHOLD: usize = 1000;

/// Count events in `[from, to]` matching the optional filters
pub fn count_events(
    service: &EventService,
    from: NaiveDateTime,
    to: NaiveDateTime,
    event_type: Option<&str>,
    user_id: Option<&str>,
) -> u64 {
    let store = service.store();

    let count = if user_id.is_none() && store.user_count() > PARALLEL_SCAN_THRESHOLD {
        store.par_count_events(from, to, event_type, None)
    } else {
        store.find_events(from, to, event_type, user_id).count()
    };

    count as u64
}

/// Count users with at least one matching event in `[from, to]`
pub fn count_distinct_users(
    service: &EventService,
    from: NaiveDateTime,
    to: NaiveDateTime,
    event_type: Option<&str>,
) -> u64 {
    service
        .store()
        .find_distinct_users(from, to, event_type)
        .count() as u64
}

/// Check whether the user ever performed this event
pub fn event_exists(service: &EventService, user_id: &str, event_type: &str) -> bool {
    service.store().exists_by_user_and_event(user_id, event_type)
}
