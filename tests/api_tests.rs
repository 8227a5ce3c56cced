//! End-to-end tests: load files from a data directory, query over HTTP

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;

use events_aggregation::api::{create_router, AppState};
use events_aggregation::event_store::EventStore;
use events_aggregation::loader::{EventLoader, LoadReport};

const FIRST_FILE: &str = "user1\t2024-01-01T10:00:00\tlogin\n\
                          user1\t2024-01-01T10:05:00\tlogout\n\
                          user2\t2024-01-01T11:00:00\tlogin\n";

const SECOND_FILE: &str = "user3\t2024-01-02T09:00:00\tlogin\n\
                           not\ta valid line\n\
                           user1\t2024-01-01T10:00:00\tlogin\n";

async fn loaded_app() -> (Router, LoadReport) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("events-1.tsv"), FIRST_FILE).unwrap();
    fs::write(dir.path().join("events-2.tsv"), SECOND_FILE).unwrap();

    let store = Arc::new(EventStore::new());
    let report = EventLoader::new(Arc::clone(&store))
        .load_dir(dir.path())
        .await
        .unwrap();

    (create_router(Arc::new(AppState::new(store))), report)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
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
async fn test_load_report() {
    let (_, report) = loaded_app().await;
    assert_eq!(
        report,
        LoadReport {
            files: 2,
            inserted: 5,
            rejected: 1
        }
    );
}

#[tokio::test]
async fn test_count_endpoint() {
    let (app, _) = loaded_app().await;

    // The duplicate user1 login collapses into one stored event
    let (status, body) = get_json(
        app.clone(),
        "/count?date_from=2024-01-01T00:00:00&date_to=2024-01-01T23:59:59",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "count": 3 }));

    let (_, body) = get_json(
        app.clone(),
        "/count?date_from=2024-01-01T00:00:00&date_to=2024-01-03T00:00:00&event=login",
    )
    .await;
    assert_eq!(body, serde_json::json!({ "count": 3 }));

    let (_, body) = get_json(
        app,
        "/count?date_from=2024-01-01T00:00:00&date_to=2024-01-03T00:00:00&user_id=user1",
    )
    .await;
    assert_eq!(body, serde_json::json!({ "count": 2 }));
}

#[tokio::test]
async fn test_count_distinct_users_endpoint() {
    let (app, _) = loaded_app().await;

    let (_, body) = get_json(
        app.clone(),
        "/count_distinct_users?date_from=2024-01-01T00:00:00&date_to=2024-01-03T00:00:00",
    )
    .await;
    assert_eq!(body, serde_json::json!({ "count": 3 }));

    let (_, body) = get_json(
        app,
        "/count_distinct_users?date_from=2024-01-01T00:00:00&date_to=2024-01-03T00:00:00&event=logout",
    )
    .await;
    assert_eq!(body, serde_json::json!({ "count": 1 }));
}

#[tokio::test]
async fn test_exists_endpoint() {
    let (app, _) = loaded_app().await;

    let (_, body) = get_json(app.clone(), "/exists?event=login&user_id=user3").await;
    assert_eq!(body, serde_json::json!({ "exists": true }));

    let (_, body) = get_json(app, "/exists?event=logout&user_id=user3").await;
    assert_eq!(body, serde_json::json!({ "exists": false }));
}

#[tokio::test]
async fn test_inverted_range_returns_zero() {
    let (app, _) = loaded_app().await;

    let (status, body) = get_json(
        app,
        "/count?date_from=2024-01-03T00:00:00&date_to=2024-01-01T00:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "count": 0 }));
}

#[tokio::test]
async fn test_unparsable_date_is_bad_request() {
    let (app, _) = loaded_app().await;

    let (status, body) = get_json(
        app,
        "/count_distinct_users?date_from=2024-01-01&date_to=2024-01-03T00:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
