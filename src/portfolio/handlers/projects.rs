// src/portfolio/handlers/projects.rs

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::super::models::{Project, ProjectForm};
use super::super::validators::ProjectValidator;
use super::{delete_by_id, fetch_by_id, order_context};
use crate::auth::{AdminUser, MaybeUser};
use crate::common::helpers::to_json_column;
use crate::common::{ApiError, AppState, Validator};

const TABLE: &str = "projects";

/// GET /api/projects - Visible projects by display order
pub async fn get_projects(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let state = state_lock.read().await.clone();

    let projects = sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE is_visible = 1 ORDER BY display_order ASC, id ASC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, "Database error fetching projects");
        ApiError::DatabaseError(e)
    })?;

    debug!(project_count = projects.len(), "Fetched visible projects");

    Ok(Json(projects))
}

/// GET /api/projects/admin - All projects including hidden ones
pub async fn get_all_projects(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<Project>>, ApiError> {
    let state = state_lock.read().await.clone();

    let projects =
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY display_order ASC, id ASC")
            .fetch_all(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching all projects");
                ApiError::DatabaseError(e)
            })?;

    debug!(
        admin = %admin.username,
        project_count = projects.len(),
        "Fetched all projects for admin"
    );

    Ok(Json(projects))
}

/// GET /api/projects/:id - Hidden projects are only visible to admins
pub async fn get_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeUser(user): MaybeUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    let state = state_lock.read().await.clone();
    let is_admin = user.map(|u| u.is_admin).unwrap_or(false);

    match fetch_by_id::<Project>(&state.db, TABLE, project_id).await? {
        Some(project) if project.is_visible != 0 || is_admin => Ok(Json(project)),
        _ => Err(ApiError::NotFound("Project not found".into())),
    }
}

/// POST /api/projects - Create a project
pub async fn create_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<ProjectForm>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let state = state_lock.read().await.clone();

    info!(admin = %admin.username, title = %form.title, "Creating project");

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, None).await?;
    let next_order = order_context.next_order();

    let validation_result = ProjectValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            admin = %admin.username,
            errors = ?validation_result.errors(),
            "Project creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    let project_id = sqlx::query(
        r#"
        INSERT INTO projects (title, description, tech, links, image, gallery, project_type,
            start_date, end_date, role, team_size, categories, is_visible, display_order)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(to_json_column(&input.tech))
    .bind(to_json_column(&input.links))
    .bind(input.image.as_deref())
    .bind(to_json_column(&input.gallery))
    .bind(input.project_type.as_deref())
    .bind(input.start_date.map(|d| d.to_string()))
    .bind(input.end_date.map(|d| d.to_string()))
    .bind(input.role.as_deref())
    .bind(input.team_size)
    .bind(to_json_column(&input.categories))
    .bind(input.is_visible.unwrap_or(true))
    .bind(input.order.unwrap_or(next_order))
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, title = %input.title, "Database error creating project");
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let project = fetch_by_id::<Project>(&state.db, TABLE, project_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("project missing after insert".into()))?;

    info!(
        admin = %admin.username,
        project_id = project.id,
        order = project.order,
        "Project created successfully"
    );

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/:id - Replace a project
///
/// Omitting `order` or `is_visible` keeps the stored value.
pub async fn update_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(project_id): Path<i64>,
    Json(form): Json<ProjectForm>,
) -> Result<Json<Project>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(admin = %admin.username, project_id = project_id, "Updating project");

    let existing = match fetch_by_id::<Project>(&state.db, TABLE, project_id).await? {
        Some(project) => project,
        None => {
            warn!(project_id = project_id, "Project not found for update");
            return Err(ApiError::NotFound("Project not found".into()));
        }
    };

    let _order_guard = state.order_writes.lock().await;
    let order_context = order_context(&state.db, TABLE, Some(project_id)).await?;
    let validation_result = ProjectValidator { order_context }.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            project_id = project_id,
            errors = ?validation_result.errors(),
            "Project update validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    sqlx::query(
        r#"
        UPDATE projects
        SET title = ?, description = ?, tech = ?, links = ?, image = ?, gallery = ?,
            project_type = ?, start_date = ?, end_date = ?, role = ?, team_size = ?,
            categories = ?, is_visible = ?, display_order = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(to_json_column(&input.tech))
    .bind(to_json_column(&input.links))
    .bind(input.image.as_deref())
    .bind(to_json_column(&input.gallery))
    .bind(input.project_type.as_deref())
    .bind(input.start_date.map(|d| d.to_string()))
    .bind(input.end_date.map(|d| d.to_string()))
    .bind(input.role.as_deref())
    .bind(input.team_size)
    .bind(to_json_column(&input.categories))
    .bind(input.is_visible.unwrap_or(existing.is_visible != 0))
    .bind(input.order.unwrap_or(existing.order))
    .bind(project_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, project_id = project_id, "Database error updating project");
        ApiError::DatabaseError(e)
    })?;

    let project = fetch_by_id::<Project>(&state.db, TABLE, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    info!(admin = %admin.username, project_id = project_id, "Project updated successfully");

    Ok(Json(project))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(project_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    if !delete_by_id(&state.db, TABLE, project_id).await? {
        warn!(project_id = project_id, "Project not found for deletion");
        return Err(ApiError::NotFound("Project not found".into()));
    }

    info!(admin = %admin.username, project_id = project_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
