//! Token issuing/verification and password hashing.
//!
//! `AuthService` is the one place that knows the signing secret and token
//! lifetime; extractors and handlers go through it.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use thiserror::Error;

use super::models::Claims;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token could not be created: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

#[derive(Clone)]
pub struct AuthService {
    secret: Arc<[u8]>,
    exp_minutes: i64,
    hash_cost: u32,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("exp_minutes", &self.exp_minutes)
            .field("hash_cost", &self.hash_cost)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: &str, exp_minutes: i64) -> Self {
        Self {
            secret: Arc::from(secret.as_bytes()),
            exp_minutes,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt cost factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn exp_minutes(&self) -> i64 {
        self.exp_minutes
    }

    /// Signs an HS256 token for `subject`
    pub fn issue_token(
        &self,
        subject: &str,
        user_id: Option<i64>,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::minutes(self.exp_minutes)).timestamp().max(0) as usize;
        let claims = Claims {
            sub: subject.to_string(),
            user_id,
            is_admin,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(AuthError::Encode)
    }

    /// Checks signature and expiry and returns the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(AuthError::InvalidToken)
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(password, self.hash_cost)?)
    }

    /// A malformed stored hash counts as a mismatch
    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        bcrypt::verify(password, password_hash).unwrap_or(false)
    }
}

/// Strips an optional `Bearer ` prefix from an Authorization header value
pub fn bearer_token(header_value: &str) -> &str {
    header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim()
}
