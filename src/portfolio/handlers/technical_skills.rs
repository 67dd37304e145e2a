// src/portfolio/handlers/technical_skills.rs

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::super::models::{ListQuery, TechnicalSkill, TechnicalSkillForm};
use super::super::validators::TechnicalSkillValidator;
use super::{admin_view, delete_by_id, fetch_by_id, order_context};
use crate::auth::{AdminUser, MaybeUser};
use crate::common::helpers::to_json_column;
use crate::common::{ApiError, AppState, Validator};

const TABLE: &str = "technical_skills";

/// GET /api/technical-skills - Skill groups by display order
pub async fn get_technical_skills(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TechnicalSkill>>, ApiError> {
    let state = state_lock.read().await.clone();

    let sql = if admin_view(&query, user.as_ref())? {
        "SELECT * FROM technical_skills ORDER BY display_order ASC, id ASC"
    } else {
        "SELECT * FROM technical_skills WHERE is_visible = 1 ORDER BY display_order ASC, id ASC"
    };

    let skills = sqlx::query_as::<_, TechnicalSkill>(sql)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching technical skills");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(skills))
}

/// POST /api/technical-skills
pub async fn create_technical_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<TechnicalSkillForm>,
) -> Result<(StatusCode, Json<TechnicalSkill>), ApiError> {
    let state = state_lock.read().await.clone();

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, None).await?;
    let next_order = order_context.next_order();

    let validation_result = TechnicalSkillValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            admin = %admin.username,
            errors = ?validation_result.errors(),
            "Technical skill creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    let skill_id = sqlx::query(
        "INSERT INTO technical_skills (title, skills, color, icon, display_order, is_visible) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&input.title)
    .bind(to_json_column(&input.skills))
    .bind(input.color.as_deref())
    .bind(input.icon.as_deref())
    .bind(input.order.unwrap_or(next_order))
    .bind(input.is_visible.unwrap_or(true))
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, title = %input.title, "Database error creating technical skill");
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let skill = fetch_by_id::<TechnicalSkill>(&state.db, TABLE, skill_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("technical skill missing after insert".into()))?;

    info!(admin = %admin.username, skill_id = skill.id, "Technical skill created");

    Ok((StatusCode::CREATED, Json(skill)))
}

/// PUT /api/technical-skills/:id
pub async fn update_technical_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(skill_id): Path<i64>,
    Json(form): Json<TechnicalSkillForm>,
) -> Result<Json<TechnicalSkill>, ApiError> {
    let state = state_lock.read().await.clone();

    let Some(existing) = fetch_by_id::<TechnicalSkill>(&state.db, TABLE, skill_id).await? else {
        return Err(ApiError::NotFound("Technical skill not found".into()));
    };

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, Some(skill_id)).await?;
    let validation_result = TechnicalSkillValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            skill_id = skill_id,
            errors = ?validation_result.errors(),
            "Technical skill update validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    sqlx::query(
        "UPDATE technical_skills SET title = ?, skills = ?, color = ?, icon = ?, \
         display_order = ?, is_visible = ? WHERE id = ?",
    )
    .bind(&input.title)
    .bind(to_json_column(&input.skills))
    .bind(input.color.as_deref())
    .bind(input.icon.as_deref())
    .bind(input.order.unwrap_or(existing.order))
    .bind(input.is_visible.unwrap_or(existing.is_visible != 0))
    .bind(skill_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, skill_id = skill_id, "Database error updating technical skill");
        ApiError::DatabaseError(e)
    })?;

    let skill = fetch_by_id::<TechnicalSkill>(&state.db, TABLE, skill_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Technical skill not found".into()))?;

    info!(admin = %admin.username, skill_id = skill_id, "Technical skill updated");

    Ok(Json(skill))
}

/// DELETE /api/technical-skills/:id
pub async fn delete_technical_skill(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(skill_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    if !delete_by_id(&state.db, TABLE, skill_id).await? {
        return Err(ApiError::NotFound("Technical skill not found".into()));
    }

    info!(admin = %admin.username, skill_id = skill_id, "Technical skill deleted");

    Ok(StatusCode::NO_CONTENT)
}
