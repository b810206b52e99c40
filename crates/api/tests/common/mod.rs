//! Shared harness for router tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use sras_api::middleware::ROLE_HEADER;
use sras_api::{AppState, create_router};
use sras_db::migration::{Migrator, MigratorTrait};
use tower::ServiceExt;

/// Builds the router over a fresh, migrated in-memory database.
pub async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    create_router(AppState::new(db))
}

/// Sends one request and returns the status and JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    role: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(ROLE_HEADER, role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");
    read(app, request).await
}

/// Posts a raw body, with an optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    role: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(ROLE_HEADER, role);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).expect("Failed to build request");
    read(app, request).await
}

async fn read(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str, role: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(role), None).await
}

pub async fn post(app: &Router, uri: &str, role: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(role), Some(body)).await
}

/// Posts `body` and returns the created record's `data`.
pub async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = post(app, uri, "ADMIN", body).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected response: {json}");
    json["data"].clone()
}
