//! Authentication handlers

use axum::{
    extract::{Extension, Json},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::models::{LoginForm, LoginResponse, RegisterForm, TokenResponse, User, UserEnvelope};
use super::validators::{LoginValidator, RegistrationValidator};
use crate::common::{safe_email_log, ApiError, AppState, Validator};

/// Splits a `Basic <base64(user:pass)>` header into its credentials
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?.trim();
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}

/// POST /api/auth/token
/// Issues an admin token for the configured admin credentials (HTTP Basic)
///
/// # Response
/// ```json
/// { "access_token": "<jwt>" }
/// ```
pub async fn token_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let Some((username, password)) = basic_credentials(&headers) else {
        warn!("Token request without usable Basic credentials");
        return Err(ApiError::Unauthorized(
            "Missing or invalid Basic Auth credentials".into(),
        ));
    };

    if username != state.config.admin_username || password != state.config.admin_password {
        warn!(username = %username, "Token request with invalid admin credentials");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let access_token = state.auth.issue_token(&username, None, true).map_err(|e| {
        error!(error = %e, "Failed to sign admin token");
        ApiError::InternalServer("token creation failed".into())
    })?;

    info!(username = %username, "Issued admin token via Basic auth");
    Ok(Json(TokenResponse { access_token }))
}

/// POST /api/auth/register
/// Creates a regular (non-admin) account
pub async fn register_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = RegistrationValidator.validate(&form);
    if !validation_result.is_valid() {
        warn!(
            errors = validation_result.len(),
            "Registration rejected by validation"
        );
        return Err(ApiError::from(validation_result));
    }

    let username = form.username.trim();
    let email = form.email.trim();

    let taken: Option<(String, String)> =
        sqlx::query_as("SELECT username, email FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error checking for existing user");
                ApiError::DatabaseError(e)
            })?;

    if let Some((existing_username, _)) = taken {
        let message = if existing_username == username {
            "Username already exists"
        } else {
            "Email already exists"
        };
        warn!(username = %username, email = %safe_email_log(email), "{}", message);
        return Err(ApiError::Conflict(message.into()));
    }

    let password_hash = state.auth.hash_password(&form.password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError::InternalServer("Registration failed".into())
    })?;

    let id = sqlx::query(
        "INSERT INTO users (username, email, password_hash, is_admin) VALUES (?, ?, ?, 0)",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, username = %username, "Failed to insert user");
        ApiError::DatabaseError(e)
    })?
    .last_insert_rowid();

    let user = fetch_user(&state, id).await?.ok_or_else(|| {
        ApiError::InternalServer("user missing after insert".into())
    })?;

    info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: Some("User registered successfully".to_string()),
            user,
        }),
    ))
}

/// POST /api/auth/login
/// Accepts a username or an email in the `username` field
pub async fn login_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = LoginValidator.validate(&form);
    if !validation_result.is_valid() {
        return Err(ApiError::from(validation_result));
    }

    let login = form.username.trim();
    let user: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ? OR email = ? LIMIT 1")
            .bind(login)
            .bind(login)
            .fetch_optional(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error during login lookup");
                ApiError::DatabaseError(e)
            })?;

    let user = match user {
        Some(u) if state.auth.verify_password(&form.password, &u.password_hash) => u,
        _ => {
            warn!(login = %login, "Login failed: invalid credentials");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
        .bind(user.id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "Failed to record last login");
            ApiError::DatabaseError(e)
        })?;

    let access_token = state
        .auth
        .issue_token(&user.username, Some(user.id), user.is_admin())
        .map_err(|e| {
            error!(error = %e, "Failed to sign login token");
            ApiError::InternalServer("Login failed".into())
        })?;

    let user = fetch_user(&state, user.id).await?.unwrap_or(user);

    info!(user_id = user.id, is_admin = user.is_admin(), "Login successful");

    Ok(Json(LoginResponse {
        access_token,
        user,
        message: "Login successful".to_string(),
    }))
}

/// GET /api/auth/me
/// Returns the account behind the token; admin tokens issued from Basic
/// credentials resolve by username
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = match authed.user_id {
        Some(id) => fetch_user(&state, id).await?,
        None => sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(&authed.username)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?,
    };

    match user {
        Some(user) => Ok(Json(UserEnvelope {
            message: None,
            user,
        })),
        None => Err(ApiError::NotFound("User not found".into())),
    }
}

async fn fetch_user(state: &AppState, id: i64) -> Result<Option<User>, ApiError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = id, "Database error fetching user");
            ApiError::DatabaseError(e)
        })
}
