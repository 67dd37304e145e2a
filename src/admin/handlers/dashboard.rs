// src/admin/handlers/dashboard.rs

use axum::{extract::Extension, Json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::admin::models::DashboardStats;
use crate::auth::AdminUser;
use crate::common::{ApiError, AppState};

async fn count(db: &SqlitePool, sql: &str, label: &'static str) -> Result<i64, ApiError> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                counter = label,
                "Database error fetching dashboard count"
            );
            ApiError::DatabaseError(e)
        })
}

/// GET /api/admin/dashboard - Content and account counts
pub async fn get_dashboard_stats(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<DashboardStats>, ApiError> {
    let state = state_lock.read().await.clone();
    let db = &state.db;

    let stats = DashboardStats {
        projects_count: count(db, "SELECT COUNT(*) FROM projects", "projects").await?,
        blogs_count: count(db, "SELECT COUNT(*) FROM blogs", "blogs").await?,
        certifications_count: count(db, "SELECT COUNT(*) FROM certifications", "certifications")
            .await?,
        contact_messages_count: count(db, "SELECT COUNT(*) FROM contact_messages", "messages")
            .await?,
        unread_messages_count: count(
            db,
            "SELECT COUNT(*) FROM contact_messages WHERE is_read = 0",
            "unread_messages",
        )
        .await?,
        users_count: count(db, "SELECT COUNT(*) FROM users", "users").await?,
    };

    info!(
        admin = %admin.username,
        projects = stats.projects_count,
        blogs = stats.blogs_count,
        unread_messages = stats.unread_messages_count,
        "Dashboard stats fetched"
    );

    Ok(Json(stats))
}
