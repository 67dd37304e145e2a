// src/admin/routes.rs

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers;

pub fn admin_routes() -> Router {
    Router::new()
        // Dashboard
        .route(
            "/api/admin/dashboard",
            get(handlers::dashboard::get_dashboard_stats),
        )
        // User management
        .route("/api/admin/users", get(handlers::users::get_users))
        .route(
            "/api/admin/users/:id",
            delete(handlers::users::delete_user),
        )
        .route(
            "/api/admin/users/:id/toggle-admin",
            put(handlers::users::toggle_user_admin),
        )
}
