// src/portfolio/handlers/mod.rs

pub mod about;
pub mod blogs;
pub mod certifications;
pub mod experiences;
pub mod projects;
pub mod resume;
pub mod technical_skills;

use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};
use tracing::{error, warn};

use super::models::ListQuery;
use crate::auth::AuthedUser;
use crate::common::validation::{OrderValidationContext, OrderedItem};
use crate::common::ApiError;

/// Whether a listing should include hidden rows.
///
/// `?admin=true` asks for the management view, which needs an admin token.
pub(crate) fn admin_view(query: &ListQuery, user: Option<&AuthedUser>) -> Result<bool, ApiError> {
    if !query.wants_admin_view() {
        return Ok(false);
    }
    match user {
        Some(user) if user.is_admin => Ok(true),
        Some(user) => {
            warn!(username = %user.username, "Non-admin requested admin listing");
            Err(ApiError::Forbidden("Admin access required".into()))
        }
        None => Err(ApiError::Unauthorized("missing auth".into())),
    }
}

/// Sibling orders of `table`, with `current_id` marking the record being
/// edited
pub(crate) async fn order_context(
    db: &SqlitePool,
    table: &'static str,
    current_id: Option<i64>,
) -> Result<OrderValidationContext, ApiError> {
    let existing_items = sqlx::query_as::<_, OrderedItem>(&format!(
        "SELECT id, display_order FROM {}",
        table
    ))
    .fetch_all(db)
    .await
    .map_err(|e| {
        error!(error = %e, table = table, "Database error loading sibling orders");
        ApiError::DatabaseError(e)
    })?;

    Ok(OrderValidationContext {
        current_id,
        existing_items,
    })
}

pub(crate) async fn fetch_by_id<T>(
    db: &SqlitePool,
    table: &'static str,
    id: i64,
) -> Result<Option<T>, ApiError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(&format!("SELECT * FROM {} WHERE id = ?", table))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, table = table, id = id, "Database error fetching record");
            ApiError::DatabaseError(e)
        })
}

/// Returns whether a row was removed
pub(crate) async fn delete_by_id(
    db: &SqlitePool,
    table: &'static str,
    id: i64,
) -> Result<bool, ApiError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, table = table, id = id, "Database error deleting record");
            ApiError::DatabaseError(e)
        })?;

    Ok(result.rows_affected() > 0)
}
