// src/portfolio/handlers/certifications.rs

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::super::models::{Certification, CertificationForm};
use super::super::validators::CertificationValidator;
use super::{delete_by_id, fetch_by_id};
use crate::auth::AdminUser;
use crate::common::helpers::to_json_column;
use crate::common::{ApiError, AppState, Validator};

const TABLE: &str = "certifications";

/// GET /api/certifications
pub async fn get_certifications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Certification>>, ApiError> {
    let state = state_lock.read().await.clone();

    let certifications =
        sqlx::query_as::<_, Certification>("SELECT * FROM certifications ORDER BY id ASC")
            .fetch_all(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching certifications");
                ApiError::DatabaseError(e)
            })?;

    Ok(Json(certifications))
}

/// POST /api/certifications
pub async fn create_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<CertificationForm>,
) -> Result<(StatusCode, Json<Certification>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = CertificationValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            admin = %admin.username,
            errors = ?validation_result.errors(),
            "Certification creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    let certification_id = sqlx::query(
        r#"
        INSERT INTO certifications (name, issuer, date, credential_url, image, description,
            skills, certificate_id, expiration_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.issuer)
    .bind(input.date.as_deref())
    .bind(input.credential_url.as_deref())
    .bind(input.image.as_deref())
    .bind(input.description.as_deref())
    .bind(to_json_column(&input.skills))
    .bind(input.certificate_id.as_deref())
    .bind(input.expiration_date.map(|d| d.to_string()))
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, name = %input.name, "Database error creating certification");
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let certification = fetch_by_id::<Certification>(&state.db, TABLE, certification_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("certification missing after insert".into()))?;

    info!(
        admin = %admin.username,
        certification_id = certification.id,
        issuer = %certification.issuer,
        "Certification created"
    );

    Ok((StatusCode::CREATED, Json(certification)))
}

/// PUT /api/certifications/:id
pub async fn update_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(certification_id): Path<i64>,
    Json(form): Json<CertificationForm>,
) -> Result<Json<Certification>, ApiError> {
    let state = state_lock.read().await.clone();

    if fetch_by_id::<Certification>(&state.db, TABLE, certification_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Certification not found".into()));
    }

    let validation_result = CertificationValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            certification_id = certification_id,
            errors = ?validation_result.errors(),
            "Certification update validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let input = form.into_input();

    sqlx::query(
        r#"
        UPDATE certifications
        SET name = ?, issuer = ?, date = ?, credential_url = ?, image = ?, description = ?,
            skills = ?, certificate_id = ?, expiration_date = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.issuer)
    .bind(input.date.as_deref())
    .bind(input.credential_url.as_deref())
    .bind(input.image.as_deref())
    .bind(input.description.as_deref())
    .bind(to_json_column(&input.skills))
    .bind(input.certificate_id.as_deref())
    .bind(input.expiration_date.map(|d| d.to_string()))
    .bind(certification_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            certification_id = certification_id,
            "Database error updating certification"
        );
        ApiError::DatabaseError(e)
    })?;

    let certification = fetch_by_id::<Certification>(&state.db, TABLE, certification_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Certification not found".into()))?;

    info!(
        admin = %admin.username,
        certification_id = certification_id,
        "Certification updated"
    );

    Ok(Json(certification))
}

/// DELETE /api/certifications/:id
pub async fn delete_certification(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(certification_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    if !delete_by_id(&state.db, TABLE, certification_id).await? {
        return Err(ApiError::NotFound("Certification not found".into()));
    }

    info!(
        admin = %admin.username,
        certification_id = certification_id,
        "Certification deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
