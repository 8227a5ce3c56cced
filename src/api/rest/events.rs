//! Event query endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiError;
use crate::api::state::AppState;
use crate::types::{EventsError, EventsResult};
use crate::utils::parse_local_datetime;

/// Query parameters for `/count`
#[derive(Debug, Deserialize)]
pub struct CountEventsParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Filter by event type
    pub event: Option<String>,
    /// Filter by user
    pub user_id: Option<String>,
}

/// Query parameters for `/count_distinct_users`
#[derive(Debug, Deserialize)]
pub struct CountDistinctUsersParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub event: Option<String>,
}

/// Query parameters for `/exists`
#[derive(Debug, Deserialize)]
pub struct EventExistsParams {
    pub event: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountEventsResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountDistinctUsersResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventExistsResponse {
    pub exists: bool,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> EventsResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EventsError::InvalidArgument(format!("Query parameter '{}' is required", name)))
}

/// Blank optional filters count as absent
fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn date_range(
    date_from: &Option<String>,
    date_to: &Option<String>,
) -> EventsResult<(NaiveDateTime, NaiveDateTime)> {
    let from = parse_local_datetime(required(date_from, "date_from")?)?;
    let to = parse_local_datetime(required(date_to, "date_to")?)?;
    Ok((from, to))
}

/// GET /count - Count events in `[date_from, date_to]`
pub async fn count_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountEventsParams>,
) -> Result<Json<CountEventsResponse>, ApiError> {
    info!(
        "Count total events query with params, date_from: {:?} date_to: {:?} event: {:?} user_id: {:?}",
        params.date_from, params.date_to, params.event, params.user_id
    );

    let (from, to) = date_range(&params.date_from, &params.date_to)?;
    let count = state.service.count_events(
        from,
        to,
        optional(&params.event),
        optional(&params.user_id),
    );

    Ok(Json(CountEventsResponse { count }))
}

/// GET /count_distinct_users - Count distinct users in `[date_from, date_to]`
pub async fn count_distinct_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountDistinctUsersParams>,
) -> Result<Json<CountDistinctUsersResponse>, ApiError> {
    info!(
        "Count distinct users query with params, date_from: {:?} date_to: {:?} event: {:?}",
        params.date_from, params.date_to, params.event
    );

    let (from, to) = date_range(&params.date_from, &params.date_to)?;
    let count = state
        .service
        .count_distinct_users(from, to, optional(&params.event));

    Ok(Json(CountDistinctUsersResponse { count }))
}

/// GET /exists - Check whether a user ever performed an event
pub async fn event_exists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventExistsParams>,
) -> Result<Json<EventExistsResponse>, ApiError> {
    info!(
        "Check if event exists query with params, event: {:?} user_id: {:?}",
        params.event, params.user_id
    );

    let event = required(&params.event, "event")?;
    let user_id = required(&params.user_id, "user_id")?;
    let exists = state.service.event_exists(user_id, event);

    Ok(Json(EventExistsResponse { exists }))
}
