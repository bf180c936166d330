//! Test helper utilities for mathserver integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

use mathserver::{HistoryStore, InMemoryHistoryStore, WebServer};

/// Router over a fresh in-memory store, plus the store handle for inspection
pub fn create_test_app() -> (Router, Arc<InMemoryHistoryStore>) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let server = WebServer::with_shared_store(store.clone());
    (server.build_router(), store)
}

/// Router over any store implementation
pub fn create_app_with_store<H: HistoryStore + 'static>(store: H) -> Router {
    WebServer::new(store).build_router()
}

/// Send a request and decode the JSON response
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Number of calculations the history endpoint reports
pub async fn history_count(app: &Router) -> u64 {
    let (status, body) = get(app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    body["count"].as_u64().unwrap()
}
