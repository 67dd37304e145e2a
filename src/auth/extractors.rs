//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::User;
use super::service::bearer_token;
use crate::common::{ApiError, AppState};

/// Authenticated caller extractor
///
/// Validates the JWT from the Authorization header (`Bearer <token>` or the
/// raw token). Tokens that carry a `user_id` are checked against the users
/// table so a revoked admin flag or a deleted account takes effect
/// immediately. Tokens issued from the configured admin credentials carry no
/// `user_id` and are trusted as signed.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: Option<i64>,
    pub username: String,
    pub is_admin: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let header = match parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        {
            Some(h) => h,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        let claims = match app_state.auth.verify_token(bearer_token(header)) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "JWT token validation failed");
                return Err(ApiError::Unauthorized("invalid token".into()));
            }
        };

        let Some(user_id) = claims.user_id else {
            debug!(
                username = %claims.sub,
                is_admin = claims.is_admin,
                "Token without user record accepted"
            );
            return Ok(AuthedUser {
                user_id: None,
                username: claims.sub,
                is_admin: claims.is_admin,
            });
        };

        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&app_state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    user_id = user_id,
                    "Database error during user lookup in authentication"
                );
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                debug!(
                    user_id = u.id,
                    username = %u.username,
                    is_admin = u.is_admin(),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    user_id: Some(u.id),
                    is_admin: u.is_admin(),
                    username: u.username,
                })
            }
            None => {
                warn!(user_id = user_id, "Authentication failed: user not found in database");
                Err(ApiError::Unauthorized("user not found".into()))
            }
        }
    }
}

/// Authenticated caller that must also hold the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthedUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            warn!(
                username = %user.username,
                path = %parts.uri.path(),
                "Non-admin attempted to access admin endpoint"
            );
            return Err(ApiError::Forbidden("Admin access required".into()));
        }

        Ok(AdminUser(user))
    }
}

/// Optional variant used by public listings that show more to admins
///
/// Missing credentials yield `None`; present but invalid credentials are
/// rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeUser(None));
        }
        AuthedUser::from_request_parts(parts, state)
            .await
            .map(|user| MaybeUser(Some(user)))
    }
}
