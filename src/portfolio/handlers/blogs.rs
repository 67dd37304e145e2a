// src/portfolio/handlers/blogs.rs

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::super::models::{Author, AuthorInput, Blog, BlogForm, BlogInput, BlogView, Tag};
use super::super::validators::BlogValidator;
use super::{delete_by_id, fetch_by_id};
use crate::auth::{AdminUser, MaybeUser};
use crate::common::{ApiError, AppState, Validator};

const TABLE: &str = "blogs";

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
    move |e| {
        error!(error = %e, "{}", context);
        ApiError::DatabaseError(e)
    }
}

/// Attaches author and tags to a stored blog
async fn blog_view(db: &SqlitePool, blog: Blog) -> Result<BlogView, ApiError> {
    let author = match blog.author_id {
        Some(author_id) => sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(author_id)
            .fetch_optional(db)
            .await
            .map_err(db_error("Database error fetching blog author"))?,
        None => None,
    };

    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name FROM tags t
        JOIN blog_tags bt ON bt.tag_id = t.id
        WHERE bt.blog_id = ?
        ORDER BY t.name ASC
        "#,
    )
    .bind(blog.id)
    .fetch_all(db)
    .await
    .map_err(db_error("Database error fetching blog tags"))?;

    Ok(BlogView { blog, author, tags })
}

async fn blog_views(db: &SqlitePool, blogs: Vec<Blog>) -> Result<Vec<BlogView>, ApiError> {
    let mut views = Vec::with_capacity(blogs.len());
    for blog in blogs {
        views.push(blog_view(db, blog).await?);
    }
    Ok(views)
}

/// Finds an author by name, creating one when missing
async fn resolve_author(
    tx: &mut Transaction<'_, Sqlite>,
    author: &AuthorInput,
) -> Result<i64, ApiError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM authors WHERE name = ?")
        .bind(&author.name)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_error("Database error looking up author"))?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id = sqlx::query("INSERT INTO authors (name, email) VALUES (?, ?)")
        .bind(&author.name)
        .bind(author.email.as_deref())
        .execute(&mut **tx)
        .await
        .map_err(db_error("Database error creating author"))?
        .last_insert_rowid();

    debug!(author_id = id, name = %author.name, "Created blog author");
    Ok(id)
}

/// Replaces the blog's tag set, creating unknown tags by name
async fn replace_tags(
    tx: &mut Transaction<'_, Sqlite>,
    blog_id: i64,
    tags: &[String],
) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM blog_tags WHERE blog_id = ?")
        .bind(blog_id)
        .execute(&mut **tx)
        .await
        .map_err(db_error("Database error clearing blog tags"))?;

    for name in tags {
        sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
            .bind(name)
            .execute(&mut **tx)
            .await
            .map_err(db_error("Database error creating tag"))?;

        let tag_id = sqlx::query_scalar::<_, i64>("SELECT id FROM tags WHERE name = ?")
            .bind(name)
            .fetch_one(&mut **tx)
            .await
            .map_err(db_error("Database error looking up tag"))?;

        sqlx::query("INSERT OR IGNORE INTO blog_tags (blog_id, tag_id) VALUES (?, ?)")
            .bind(blog_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(db_error("Database error linking tag"))?;
    }

    Ok(())
}

fn validated_input(form: BlogForm) -> Result<BlogInput, ApiError> {
    let validation_result = BlogValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            errors = ?validation_result.errors(),
            "Blog validation failed"
        );
        return Err(ApiError::from(validation_result));
    }
    Ok(form.into_input())
}

/// GET /api/blogs - Visible posts, newest first
pub async fn get_blogs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<BlogView>>, ApiError> {
    let state = state_lock.read().await.clone();

    let blogs =
        sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE is_visible = 1 ORDER BY date DESC")
            .fetch_all(&state.db)
            .await
            .map_err(db_error("Database error fetching blogs"))?;

    Ok(Json(blog_views(&state.db, blogs).await?))
}

/// GET /api/blogs/admin - All posts, newest first
pub async fn get_all_blogs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<BlogView>>, ApiError> {
    let state = state_lock.read().await.clone();

    let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY date DESC")
        .fetch_all(&state.db)
        .await
        .map_err(db_error("Database error fetching all blogs"))?;

    debug!(admin = %admin.username, blog_count = blogs.len(), "Fetched all blogs");

    Ok(Json(blog_views(&state.db, blogs).await?))
}

/// GET /api/blogs/:id - Hidden posts are only visible to admins
pub async fn get_blog(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    MaybeUser(user): MaybeUser,
    Path(blog_id): Path<i64>,
) -> Result<Json<BlogView>, ApiError> {
    let state = state_lock.read().await.clone();
    let is_admin = user.map(|u| u.is_admin).unwrap_or(false);

    match fetch_by_id::<Blog>(&state.db, TABLE, blog_id).await? {
        Some(blog) if blog.is_visible != 0 || is_admin => {
            Ok(Json(blog_view(&state.db, blog).await?))
        }
        _ => Err(ApiError::NotFound("Blog not found".into())),
    }
}

/// POST /api/blogs
pub async fn create_blog(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Json(form): Json<BlogForm>,
) -> Result<(StatusCode, Json<BlogView>), ApiError> {
    let state = state_lock.read().await.clone();

    info!(admin = %admin.username, title = %form.title, "Creating blog post");

    let input = validated_input(form)?;

    let mut tx = state
        .db
        .begin()
        .await
        .map_err(db_error("Failed to start blog transaction"))?;

    let author_id = match &input.author {
        Some(author) => Some(resolve_author(&mut tx, author).await?),
        None => None,
    };

    let blog_id = sqlx::query(
        r#"
        INSERT INTO blogs (title, excerpt, content, cover_image, date, reading_time, featured,
            is_visible, author_id)
        VALUES (?, ?, ?, ?, COALESCE(?, strftime('%Y-%m-%dT%H:%M:%S', 'now')), ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(input.excerpt.as_deref())
    .bind(&input.content)
    .bind(input.cover_image.as_deref())
    .bind(input.date.as_deref())
    .bind(input.reading_time)
    .bind(input.featured.unwrap_or(false))
    .bind(input.is_visible.unwrap_or(true))
    .bind(author_id)
    .execute(&mut *tx)
    .await
    .map_err(db_error("Database error creating blog"))?
    .last_insert_rowid();

    replace_tags(&mut tx, blog_id, &input.tags).await?;

    tx.commit()
        .await
        .map_err(db_error("Failed to commit blog transaction"))?;

    let blog = fetch_by_id::<Blog>(&state.db, TABLE, blog_id)
        .await?
        .ok_or_else(|| ApiError::InternalServer("blog missing after insert".into()))?;

    info!(
        admin = %admin.username,
        blog_id = blog_id,
        tag_count = input.tags.len(),
        "Blog post created"
    );

    Ok((StatusCode::CREATED, Json(blog_view(&state.db, blog).await?)))
}

/// PUT /api/blogs/:id - Replace a post; omitted date and flags keep their
/// stored values
pub async fn update_blog(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(blog_id): Path<i64>,
    Json(form): Json<BlogForm>,
) -> Result<Json<BlogView>, ApiError> {
    let state = state_lock.read().await.clone();

    let Some(existing) = fetch_by_id::<Blog>(&state.db, TABLE, blog_id).await? else {
        warn!(blog_id = blog_id, "Blog not found for update");
        return Err(ApiError::NotFound("Blog not found".into()));
    };

    let input = validated_input(form)?;

    let mut tx = state
        .db
        .begin()
        .await
        .map_err(db_error("Failed to start blog transaction"))?;

    let author_id = match &input.author {
        Some(author) => Some(resolve_author(&mut tx, author).await?),
        None => None,
    };

    sqlx::query(
        r#"
        UPDATE blogs
        SET title = ?, excerpt = ?, content = ?, cover_image = ?, date = ?, reading_time = ?,
            featured = ?, is_visible = ?, author_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(input.excerpt.as_deref())
    .bind(&input.content)
    .bind(input.cover_image.as_deref())
    .bind(input.date.as_deref().or(existing.date.as_deref()))
    .bind(input.reading_time)
    .bind(input.featured.unwrap_or(existing.featured != 0))
    .bind(input.is_visible.unwrap_or(existing.is_visible != 0))
    .bind(author_id)
    .bind(blog_id)
    .execute(&mut *tx)
    .await
    .map_err(db_error("Database error updating blog"))?;

    replace_tags(&mut tx, blog_id, &input.tags).await?;

    tx.commit()
        .await
        .map_err(db_error("Failed to commit blog transaction"))?;

    let blog = fetch_by_id::<Blog>(&state.db, TABLE, blog_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))?;

    info!(admin = %admin.username, blog_id = blog_id, "Blog post updated");

    Ok(Json(blog_view(&state.db, blog).await?))
}

/// DELETE /api/blogs/:id
pub async fn delete_blog(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    AdminUser(admin): AdminUser,
    Path(blog_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    if !delete_by_id(&state.db, TABLE, blog_id).await? {
        return Err(ApiError::NotFound("Blog not found".into()));
    }

    info!(admin = %admin.username, blog_id = blog_id, "Blog post deleted");

    Ok(StatusCode::NO_CONTENT)
}
