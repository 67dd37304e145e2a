// src/admin/handlers/users.rs

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::admin::models::UserUpdateResponse;
use crate::auth::{AdminUser, User};
use crate::common::{ApiError, AppState};

async fn fetch_user(state: &AppState, user_id: i64) -> Result<Option<User>, ApiError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, target_user_id = user_id, "Database error fetching user");
            ApiError::DatabaseError(e)
        })
}

/// GET /api/admin/users - All registered users, newest first
pub async fn get_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let state = state_lock.read().await.clone();

    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC, id DESC")
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching users list");
            ApiError::DatabaseError(e)
        })?;

    info!(
        admin = %admin.username,
        user_count = users.len(),
        "Users list fetched"
    );

    Ok(Json(users))
}

/// PUT /api/admin/users/:id/toggle-admin - Flip a user's admin flag
pub async fn toggle_user_admin(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserUpdateResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if admin.user_id == Some(user_id) {
        warn!(
            admin = %admin.username,
            "Admin status change rejected: cannot change own admin status"
        );
        return Err(ApiError::BadRequest(
            "Cannot change your own admin status".to_string(),
        ));
    }

    let result = sqlx::query(
        "UPDATE users SET is_admin = CASE WHEN is_admin = 0 THEN 1 ELSE 0 END WHERE id = ?",
    )
    .bind(user_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, target_user_id = user_id, "Database error toggling admin status");
        ApiError::DatabaseError(e)
    })?;

    if result.rows_affected() == 0 {
        warn!(target_user_id = user_id, "Admin toggle failed: user not found");
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let user = fetch_user(&state, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(
        admin = %admin.username,
        target_user_id = user_id,
        is_admin = user.is_admin(),
        "User admin status updated"
    );

    Ok(Json(UserUpdateResponse {
        message: "User admin status updated".to_string(),
        user,
    }))
}

/// DELETE /api/admin/users/:id
pub async fn delete_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    // Prevent self-deletion
    if admin.user_id == Some(user_id) {
        warn!(
            admin = %admin.username,
            "User deletion rejected: cannot delete own account"
        );
        return Err(ApiError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, target_user_id = user_id, "Database error deleting user");
            ApiError::DatabaseError(e)
        })?;

    if result.rows_affected() == 0 {
        warn!(target_user_id = user_id, "User deletion failed: user not found");
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(
        admin = %admin.username,
        target_user_id = user_id,
        "User deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
