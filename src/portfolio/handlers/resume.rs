// src/portfolio/handlers/resume.rs

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::common::{ApiError, AppState};

/// GET /api/resume - Download the configured resume PDF
pub async fn download_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();
    let path = &state.config.resume_path;

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Resume file not found");
            return Err(ApiError::NotFound("Resume not found".into()));
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "Failed to read resume file");
            return Err(ApiError::InternalServer("Failed to read resume".into()));
        }
    };

    debug!(path = %path.display(), size = bytes.len(), "Serving resume");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.resume_download_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
