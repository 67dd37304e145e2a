//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/token` - Admin token from HTTP Basic credentials
/// - `POST /api/auth/register` - Create a regular account
/// - `POST /api/auth/login` - Username/email + password login
/// - `GET /api/auth/me` - Current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/token", post(handlers::token_handler))
        .route("/api/auth/register", post(handlers::register_handler))
        .route("/api/auth/login", post(handlers::login_handler))
        .route("/api/auth/me", get(handlers::me_handler))
}
