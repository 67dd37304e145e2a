// src/portfolio/handlers/experiences.rs

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::super::models::{Experience, ExperienceForm, ExperienceView, ListQuery};
use super::super::validators::ExperienceValidator;
use super::{admin_view, delete_by_id, fetch_by_id, order_context};
use crate::auth::{AdminUser, MaybeUser};
use crate::common::helpers::to_json_column;
use crate::common::{ApiError, AppState, Validator};

const TABLE: &str = "experiences";

/// GET /api/experiences - Highest display order first, then most recent
///
/// `?admin=true` includes hidden experiences and requires an admin token.
pub async fn get_experiences(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ExperienceView>>, ApiError> {
    let state = state_lock.read().await.clone();
    let include_hidden = admin_view(&query, user.as_ref())?;

    let sql = if include_hidden {
        "SELECT * FROM experiences ORDER BY display_order DESC, start_date DESC"
    } else {
        "SELECT * FROM experiences WHERE is_visible = 1 ORDER BY display_order DESC, start_date DESC"
    };

    let experiences = sqlx::query_as::<_, Experience>(sql)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching experiences");
            ApiError::DatabaseError(e)
        })?;

    debug!(
        experience_count = experiences.len(),
        include_hidden = include_hidden,
        "Fetched experiences"
    );

    Ok(Json(experiences.into_iter().map(ExperienceView::from).collect()))
}

/// GET /api/experiences/:id
pub async fn get_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(experience_id): Path<i64>,
) -> Result<Json<ExperienceView>, ApiError> {
    let state = state_lock.read().await.clone();

    fetch_by_id::<Experience>(&state.db, TABLE, experience_id)
        .await?
        .map(|experience| Json(ExperienceView::from(experience)))
        .ok_or_else(|| ApiError::NotFound("Experience not found".into()))
}

/// POST /api/experiences - Create a new experience
pub async fn create_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<ExperienceForm>,
) -> Result<(StatusCode, Json<ExperienceView>), ApiError> {
    let state = state_lock.read().await.clone();

    info!(
        admin = %admin.username,
        company = %form.company,
        title = %form.title,
        "Creating new experience"
    );

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, None).await?;
    let next_order = order_context.next_order();

    let validation_result = ExperienceValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            admin = %admin.username,
            errors = ?validation_result.errors(),
            "Experience creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    let experience_id = sqlx::query(
        r#"
        INSERT INTO experiences (title, company, location, start_date, end_date, is_current,
            duration, responsibilities, achievements, technologies, color, display_order, is_visible)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.company)
    .bind(input.location.as_deref())
    .bind(input.start_date.map(|d| d.to_string()))
    .bind(input.end_date.map(|d| d.to_string()))
    .bind(input.is_current.unwrap_or(false))
    .bind(input.duration.as_deref())
    .bind(to_json_column(&input.responsibilities))
    .bind(to_json_column(&input.achievements))
    .bind(to_json_column(&input.technologies))
    .bind(input.color.as_deref())
    .bind(input.order.unwrap_or(next_order))
    .bind(input.is_visible.unwrap_or(true))
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, company = %input.company, "Database error creating experience");
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let experience = fetch_by_id::<Experience>(&state.db, TABLE, experience_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("experience missing after insert".into()))?;

    info!(
        admin = %admin.username,
        experience_id = experience.id,
        company = %experience.company,
        "Experience created successfully"
    );

    Ok((StatusCode::CREATED, Json(ExperienceView::from(experience))))
}

/// PUT /api/experiences/:id - Replace an experience
pub async fn update_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(experience_id): Path<i64>,
    Json(form): Json<ExperienceForm>,
) -> Result<Json<ExperienceView>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(admin = %admin.username, experience_id = experience_id, "Updating experience");

    let Some(existing) = fetch_by_id::<Experience>(&state.db, TABLE, experience_id).await? else {
        warn!(experience_id = experience_id, "Experience not found for update");
        return Err(ApiError::NotFound("Experience not found".into()));
    };

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, Some(experience_id)).await?;
    let validation_result = ExperienceValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            experience_id = experience_id,
            errors = ?validation_result.errors(),
            "Experience update validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    sqlx::query(
        r#"
        UPDATE experiences
        SET title = ?, company = ?, location = ?, start_date = ?, end_date = ?, is_current = ?,
            duration = ?, responsibilities = ?, achievements = ?, technologies = ?, color = ?,
            display_order = ?, is_visible = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.company)
    .bind(input.location.as_deref())
    .bind(input.start_date.map(|d| d.to_string()))
    .bind(input.end_date.map(|d| d.to_string()))
    .bind(input.is_current.unwrap_or(existing.is_current != 0))
    .bind(input.duration.as_deref())
    .bind(to_json_column(&input.responsibilities))
    .bind(to_json_column(&input.achievements))
    .bind(to_json_column(&input.technologies))
    .bind(input.color.as_deref())
    .bind(input.order.unwrap_or(existing.order))
    .bind(input.is_visible.unwrap_or(existing.is_visible != 0))
    .bind(experience_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            experience_id = experience_id,
            "Database error updating experience"
        );
        ApiError::DatabaseError(e)
    })?;

    let experience = fetch_by_id::<Experience>(&state.db, TABLE, experience_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Experience not found".into()))?;

    info!(
        admin = %admin.username,
        experience_id = experience_id,
        "Experience updated successfully"
    );

    Ok(Json(ExperienceView::from(experience)))
}

/// DELETE /api/experiences/:id
pub async fn delete_experience(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(experience_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    if !delete_by_id(&state.db, TABLE, experience_id).await? {
        warn!(experience_id = experience_id, "Experience not found for deletion");
        return Err(ApiError::NotFound("Experience not found".into()));
    }

    info!(admin = %admin.username, experience_id = experience_id, "Experience deleted");

    Ok(StatusCode::NO_CONTENT)
}
