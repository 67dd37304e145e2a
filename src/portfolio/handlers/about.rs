// src/portfolio/handlers/about.rs
//! The about entry is a singleton: at most one row exists.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::super::models::{About, AboutForm, AboutInput};
use super::super::validators::AboutValidator;
use crate::auth::AdminUser;
use crate::common::helpers::to_json_column;
use crate::common::{ApiError, AppState, Validator};

async fn current_about(state: &AppState) -> Result<Option<About>, ApiError> {
    sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY id ASC LIMIT 1")
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching about info");
            ApiError::DatabaseError(e)
        })
}

fn validated_input(form: AboutForm) -> Result<AboutInput, ApiError> {
    let validation_result = AboutValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            errors = ?validation_result.errors(),
            "About validation failed"
        );
        return Err(ApiError::from(validation_result));
    }
    Ok(form.into_input())
}

/// GET /api/about
pub async fn get_about(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<About>, ApiError> {
    let state = state_lock.read().await.clone();

    current_about(&state)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("About info not found".into()))
}

/// POST /api/about - Only allowed while no entry exists
pub async fn create_about(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<AboutForm>,
) -> Result<(StatusCode, Json<About>), ApiError> {
    let state = state_lock.read().await.clone();

    if current_about(&state).await?.is_some() {
        warn!(admin = %admin.username, "About info already exists");
        return Err(ApiError::Conflict(
            "About info already exists. Use PUT to update.".into(),
        ));
    }

    let input = validated_input(form)?;

    sqlx::query(
        r#"
        INSERT INTO about (name, headline, bio, photo, cover_image, location, email, phone,
            birthday, resume_url, social_links)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(input.headline.as_deref())
    .bind(&input.bio)
    .bind(input.photo.as_deref())
    .bind(input.cover_image.as_deref())
    .bind(input.location.as_deref())
    .bind(input.email.as_deref())
    .bind(input.phone.as_deref())
    .bind(input.birthday.map(|d| d.to_string()))
    .bind(input.resume_url.as_deref())
    .bind(input.social_links.as_ref().map(to_json_column))
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error creating about info");
        ApiError::DatabaseError(e)
    })?;

    let about = current_about(&state)
        .await?
        .ok_or_else(|| ApiError::InternalServer("about info missing after insert".into()))?;

    info!(admin = %admin.username, "About info created");

    Ok((StatusCode::CREATED, Json(about)))
}

/// PUT /api/about
pub async fn update_about(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<AboutForm>,
) -> Result<Json<About>, ApiError> {
    let state = state_lock.read().await.clone();

    let Some(existing) = current_about(&state).await? else {
        return Err(ApiError::NotFound("About info not found".into()));
    };

    let input = validated_input(form)?;

    sqlx::query(
        r#"
        UPDATE about
        SET name = ?, headline = ?, bio = ?, photo = ?, cover_image = ?, location = ?,
            email = ?, phone = ?, birthday = ?, resume_url = ?, social_links = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(input.headline.as_deref())
    .bind(&input.bio)
    .bind(input.photo.as_deref())
    .bind(input.cover_image.as_deref())
    .bind(input.location.as_deref())
    .bind(input.email.as_deref())
    .bind(input.phone.as_deref())
    .bind(input.birthday.map(|d| d.to_string()))
    .bind(input.resume_url.as_deref())
    .bind(input.social_links.as_ref().map(to_json_column))
    .bind(existing.id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error updating about info");
        ApiError::DatabaseError(e)
    })?;

    let about = current_about(&state)
        .await?
        .ok_or_else(|| ApiError::NotFound("About info not found".into()))?;

    info!(admin = %admin.username, "About info updated");

    Ok(Json(about))
}

/// DELETE /api/about - Succeeds whether or not an entry exists
pub async fn delete_about(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM about")
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting about info");
            ApiError::DatabaseError(e)
        })?;

    info!(
        admin = %admin.username,
        removed = result.rows_affected(),
        "About info deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
