// src/common/test_support.rs
//! Router-level helpers for handler tests

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::build_router;
use crate::auth::AuthService;
use crate::common::migrations::test_pool;
use crate::common::{AppConfig, AppState};

pub const TEST_SECRET: &str = "test-secret";

/// Fresh in-memory database with a cheap password hasher
pub async fn test_state() -> AppState {
    let config = AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..AppConfig::default()
    };
    let mut state = AppState::new(test_pool().await, config);
    state.auth = AuthService::new(TEST_SECRET, 60).with_hash_cost(4);
    state
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

/// Token equivalent to one issued from the configured admin credentials
pub fn admin_token(state: &AppState) -> String {
    state.auth.issue_token("admin", None, true).unwrap()
}

pub fn user_token(state: &AppState, username: &str, user_id: i64, is_admin: bool) -> String {
    state
        .auth
        .issue_token(username, Some(user_id), is_admin)
        .unwrap()
}

/// Sends one request and returns the status with the JSON body
/// (`Value::Null` for an empty body)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
