//! HTTP server setup with Axum

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::rest::events;
use super::state::AppState;
use crate::types::EventsResult;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Query endpoints
        .route("/count", get(events::count_events))
        .route("/count_distinct_users", get(events::count_distinct_users))
        .route("/exists", get(events::event_exists))
        .layer(cors)
        .with_state(state)
}

/// Serve the router until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, state: Arc<AppState>, shutdown: F) -> EventsResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_store::EventStore;
    use crate::types::Event;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let store = Arc::new(EventStore::new());
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        store.insert(Event::new("user1", ts, "login"));
        create_router(Arc::new(AppState::new(store)))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_count() {
        let (status, body) = get_body(
            app(),
            "/count?date_from=2024-01-01T00:00:00&date_to=2024-01-02T00:00:00",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "count": 1 }));
    }

    #[tokio::test]
    async fn test_count_with_filters() {
        let (_, body) = get_body(
            app(),
            "/count?date_from=2024-01-01T00:00:00&date_to=2024-01-02T00:00:00&event=logout&user_id=user1",
        )
        .await;

        assert_eq!(body, serde_json::json!({ "count": 0 }));
    }

    #[tokio::test]
    async fn test_count_distinct_users() {
        let (status, body) = get_body(
            app(),
            "/count_distinct_users?date_from=2024-01-01T00:00:00&date_to=2024-01-02T00:00:00",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "count": 1 }));
    }

    #[tokio::test]
    async fn test_exists() {
        let (status, body) = get_body(app(), "/exists?event=login&user_id=user1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "exists": true }));

        let (_, body) = get_body(app(), "/exists?event=logout&user_id=user1").await;
        assert_eq!(body, serde_json::json!({ "exists": false }));
    }

    #[tokio::test]
    async fn test_bad_date_is_bad_request() {
        let (status, body) = get_body(
            app(),
            "/count?date_from=yesterday&date_to=2024-01-02T00:00:00",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_param_is_bad_request() {
        let (status, _) = get_body(app(), "/count?date_from=2024-01-01T00:00:00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_body(app(), "/exists?event=login").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
