// src/contact/handlers.rs

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::models::{ContactForm, ContactMessage, MessageResponse};
use super::validators::ContactValidator;
use crate::auth::AdminUser;
use crate::common::{safe_email_log, ApiError, AppState, Validator};

/// POST /api/contact - Submit the contact form (public endpoint)
pub async fn submit_contact(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = ContactValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            errors = ?validation_result.errors(),
            "Contact form validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    let message_id = sqlx::query(
        r#"
        INSERT INTO contact_messages (name, email, subject, message, phone, preferred_contact_method)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(input.phone.as_deref())
    .bind(input.preferred_contact_method.as_deref())
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            from_email = %safe_email_log(&input.email),
            "Database error storing contact message"
        );
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let message = fetch_message(&state, message_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("contact message missing after insert".into()))?;

    info!(
        message_id = message_id,
        from_email = %safe_email_log(&message.email),
        subject = %message.subject,
        "Contact form submission stored"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/contact/admin/messages - Newest first
pub async fn get_contact_messages(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let state = state_lock.read().await.clone();

    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error fetching contact messages");
        ApiError::DatabaseError(e)
    })?;

    info!(
        admin = %admin.username,
        message_count = messages.len(),
        "Fetched contact messages"
    );

    Ok(Json(messages))
}

/// PUT /api/contact/admin/messages/:id/mark-read
pub async fn mark_contact_message_read(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(message_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("UPDATE contact_messages SET is_read = 1 WHERE id = ?")
        .bind(message_id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, message_id = message_id, "Failed to mark message as read");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Contact message not found".into()));
    }

    info!(admin = %admin.username, message_id = message_id, "Contact message marked read");

    Ok(Json(MessageResponse {
        message: "Contact message marked as read successfully".to_string(),
    }))
}

/// PUT /api/contact/admin/messages/mark-all-read
pub async fn mark_all_contact_messages_read(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("UPDATE contact_messages SET is_read = 1 WHERE is_read = 0")
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to mark messages as read");
            ApiError::DatabaseError(e)
        })?;

    info!(
        admin = %admin.username,
        updated = result.rows_affected(),
        "All contact messages marked read"
    );

    Ok(Json(MessageResponse {
        message: "All contact messages marked as read successfully".to_string(),
    }))
}

/// DELETE /api/contact/admin/messages/:id
pub async fn delete_contact_message(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(message_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
        .bind(message_id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, message_id = message_id, "Failed to delete contact message");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Contact message not found".into()));
    }

    info!(admin = %admin.username, message_id = message_id, "Contact message deleted");

    Ok(Json(MessageResponse {
        message: "Contact message deleted successfully".to_string(),
    }))
}

async fn fetch_message(state: &AppState, id: i64) -> Result<Option<ContactMessage>, ApiError> {
    sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, message_id = id, "Database error fetching contact message");
            ApiError::DatabaseError(e)
        })
}
