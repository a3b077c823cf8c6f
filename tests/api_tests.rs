//! HTTP API tests over the full router

use std::sync::Arc;

use apiarium::api::{create_router, AppState};
use apiarium::auth::JwtAuth;
use apiarium::store::ApiaryStore;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ApiaryStore::open(dir.path().join("data.jsonl")));
    let auth = Arc::new(JwtAuth::new(
        "test-secret-key-that-is-at-least-32-characters-long",
    ));
    (create_router(AppState::new(store, auth)), dir)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "surname": "Pérez",
            "email": email,
            "password": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_refresh() {
    let (app, _dir) = test_app();

    register(&app, "ana@example.com").await;

    // Duplicate email conflicts
    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "surname": "Pérez",
            "email": "ana@example.com",
            "password": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // Login works and returns a refresh token
    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    // Wrong password is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Refresh issues a new token pair
    let (status, body) = send(
        &app,
        "POST",
        "/auth/refresh",
        None,
        Some(json!({ "refreshToken": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let (app, _dir) = test_app();
    let access = register(&app, "ana@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/refresh",
        None,
        Some(json!({ "refreshToken": access })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_apiary_crud_and_history() {
    let (app, _dir) = test_app();
    let token = register(&app, "ana@example.com").await;

    // Create
    let (status, body) = send(
        &app,
        "POST",
        "/api/apiaries",
        Some(&token),
        Some(json!({ "name": "Valley" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_u64().unwrap();
    assert_eq!(body["box"], 0);
    assert_eq!(body["settings"]["harvesting"], false);

    // Update two tracked fields
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/apiaries/{}", id),
        Some(&token),
        Some(json!({ "hives": 8, "box": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hives"], 8);
    assert_eq!(body["box"], 3);

    // History has one row per changed field
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/apiaries/{}/history", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r["field"] == "box"
        && r["previousValue"] == "0"
        && r["newValue"] == "3"));

    // Delete
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/apiaries/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/apiaries/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cross_user_access_is_forbidden() {
    let (app, _dir) = test_app();
    let ana = register(&app, "ana@example.com").await;
    let eve = register(&app, "eve@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/apiaries",
        Some(&ana),
        Some(json!({ "name": "Valley" })),
    )
    .await;
    let id = body["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/apiaries/{}", id),
        Some(&eve),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_stats_routes() {
    let (app, _dir) = test_app();
    let token = register(&app, "ana@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/apiaries",
        Some(&token),
        Some(json!({ "name": "Valley", "hives": 10 })),
    )
    .await;
    let id = body["id"].as_u64().unwrap();

    // Harvest: box 0 -> 5, then 5 -> 3 the same day
    for value in [5, 3] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/apiaries/{}", id),
            Some(&token),
            Some(json!({ "box": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Cumulative boxes reflect current state
    let (status, body) = send(&app, "GET", "/api/stats/boxes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["box"], 3);
    assert_eq!(body["total"], 3);

    // Today's harvest is latest-wins, not a sum
    let (status, body) = send(
        &app,
        "GET",
        "/api/stats/harvested/today/boxes",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["box"], 3);

    let (status, body) = send(
        &app,
        "GET",
        "/api/stats/harvested/today/counts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiaryCount"], 1);
    assert_eq!(body["hiveCount"], 10);

    // Harvested counts from current state
    let (status, body) = send(
        &app,
        "GET",
        "/api/stats/harvested/counts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiaryCount"], 1);

    // Nothing in harvest mode yet
    let (status, body) = send(
        &app,
        "GET",
        "/api/stats/harvesting/count",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    // Flip all settings to harvesting
    let (status, body) = send(
        &app,
        "PUT",
        "/api/apiaries/harvest/all",
        Some(&token),
        Some(json!({ "harvesting": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/stats/harvesting/count",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);

    // Apiary count endpoint
    let (status, body) = send(&app, "GET", "/api/apiaries/count", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiaryCount"], 1);
    assert_eq!(body["hiveCount"], 10);
}

#[tokio::test]
async fn test_tasks_and_drums() {
    let (app, _dir) = test_app();
    let token = register(&app, "ana@example.com").await;

    // Task lifecycle
    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(json!({ "title": "Check queen" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = body["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{}", task_id),
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);

    // Drums and summary
    let (status, _) = send(
        &app,
        "POST",
        "/api/drums",
        Some(&token),
        Some(json!({ "code": "D-1", "tare": 20.0, "weight": 320.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/api/drums/summary", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drumCount"], 1);
    assert_eq!(body["unsoldCount"], 1);
    assert_eq!(body["netWeight"], 300.0);
}

#[tokio::test]
async fn test_delete_account() {
    let (app, _dir) = test_app();
    let token = register(&app, "ana@example.com").await;

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@example.com");
    // Credentials never leak through the API
    assert!(body.get("passwordHash").is_none());

    let (status, _) = send(&app, "DELETE", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
