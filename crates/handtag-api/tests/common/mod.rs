//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use handtag_event_store::SqliteRepository;
use handtag_tagging::application::event_store::EventStore;
use handtag_test_support::{FixedClock, fixed_now};
use http_body_util::BodyExt;
use tower::ServiceExt;

use handtag_api::build_router;
use handtag_api::state::AppState;

/// Build the full app router over a fresh in-memory `SQLite` database and a
/// fixed clock. Clone the returned router to send several requests against
/// the same database.
pub async fn build_test_app() -> Router {
    let repository = SqliteRepository::in_memory().await.unwrap();
    let store = EventStore::new(Arc::new(repository), Arc::new(FixedClock(fixed_now())));
    build_router(AppState::new(Arc::new(store)))
}

/// Send a request with an optional JSON body. Empty response bodies come back
/// as `Value::Null`.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Start a match and return its id.
pub async fn start_match(app: &Router) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/matches",
        &serde_json::json!({
            "home_team": "HC Aalborg",
            "away_team": "GOG",
            "match_date": "2026-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["match_id"].as_str().unwrap().to_string()
}
