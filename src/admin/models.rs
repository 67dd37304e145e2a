// src/admin/models.rs

use serde::Serialize;

use crate::auth::User;

/// Content and account counts for the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub projects_count: i64,
    pub blogs_count: i64,
    pub certifications_count: i64,
    pub contact_messages_count: i64,
    pub unread_messages_count: i64,
    pub users_count: i64,
}

#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: User,
}

