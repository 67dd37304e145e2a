// src/contact/routes.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;

pub fn contact_routes() -> Router {
    Router::new()
        // Public contact form
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/contact/", post(handlers::submit_contact))
        // Admin inbox
        .route(
            "/api/contact/admin/messages",
            get(handlers::get_contact_messages),
        )
        .route(
            "/api/contact/admin/messages/mark-all-read",
            put(handlers::mark_all_contact_messages_read),
        )
        .route(
            "/api/contact/admin/messages/:id/mark-read",
            put(handlers::mark_contact_message_read),
        )
        .route(
            "/api/contact/admin/messages/:id",
            delete(handlers::delete_contact_message),
        )
}
