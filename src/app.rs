// src/app.rs
//! Router composition shared by the server binary and the router tests

use axum::{
    extract::Extension,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::common::AppState;
use crate::{admin, auth, contact, logging_middleware, portfolio};

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Explicit origins allow credentials; `*` allows any origin without them
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ]);

    if origins.iter().any(|origin| origin == "*") {
        warn!("CORS configured with wildcard origin; credentials are not allowed");
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}

/// All API routes without the state layer
pub fn api_routes() -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Authentication
        .merge(auth::auth_routes())
        // Portfolio content (projects, blogs, certifications, about, experiences, skills, resume)
        .merge(portfolio::portfolio_routes())
        // Contact form and inbox
        .merge(contact::contact_routes())
        // Admin dashboard and user management
        .merge(admin::admin_routes())
}

/// Full application: routes, shared state and middleware layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let shared = Arc::new(RwLock::new(state));

    api_routes()
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
