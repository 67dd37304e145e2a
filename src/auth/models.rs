//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::serialize_flag;
use crate::common::validation::{form_text, FormFields};

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(serialize_with = "serialize_flag")]
    pub is_admin: i64,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }
}

/// Registration form
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default, deserialize_with = "form_text")]
    pub username: String,
    #[serde(default, deserialize_with = "form_text")]
    pub email: String,
    #[serde(default, deserialize_with = "form_text")]
    pub password: String,
}

impl FormFields for RegisterForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

/// Login request; `username` may also be the account email
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default, deserialize_with = "form_text")]
    pub username: String,
    #[serde(default, deserialize_with = "form_text")]
    pub password: String,
}

impl FormFields for LoginForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct UserEnvelope {
    pub message: Option<String>,
    pub user: User,
}
