// src/contact/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::serialize_flag;
use crate::common::validation::{form_text, non_blank, FormFields};
use crate::common::{sanitize_input, sanitize_opt};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: Option<String>,
    pub preferred_contact_method: Option<String>,
    #[serde(serialize_with = "serialize_flag")]
    pub is_read: i64,
    pub created_at: Option<String>,
}

/// Public contact form submission
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "form_text")]
    pub name: String,
    #[serde(default, deserialize_with = "form_text")]
    pub email: String,
    #[serde(default, deserialize_with = "form_text")]
    pub subject: String,
    #[serde(default, deserialize_with = "form_text")]
    pub message: String,
    #[serde(default, deserialize_with = "form_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "form_text")]
    pub preferred_contact_method: String,
}

impl FormFields for ContactForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "subject" => Some(&self.subject),
            "message" => Some(&self.message),
            "phone" => Some(&self.phone),
            "preferred_contact_method" => Some(&self.preferred_contact_method),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: Option<String>,
    pub preferred_contact_method: Option<String>,
}

impl ContactForm {
    pub fn into_input(self) -> ContactInput {
        ContactInput {
            name: sanitize_input(self.name.trim()),
            email: self.email.trim().to_string(),
            subject: sanitize_input(self.subject.trim()),
            message: sanitize_input(self.message.trim()),
            phone: sanitize_opt(non_blank(&self.phone)),
            preferred_contact_method: sanitize_opt(non_blank(&self.preferred_contact_method)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
