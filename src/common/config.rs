// src/common/config.rs
//! Runtime configuration loaded from the environment (and `.env`)

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_exp_minutes: i64,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    pub cors_origins: Vec<String>,
    pub resume_path: PathBuf,
    pub resume_download_name: String,
    pub port: u16,
    pub reset_db: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://portfolio.db".to_string(),
            jwt_secret: "changeme-jwt".to_string(),
            jwt_exp_minutes: 60,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            admin_email: "admin@portfolio.com".to_string(),
            cors_origins: vec!["http://localhost:5000".to_string()],
            resume_path: PathBuf::from("./assets/resume.pdf"),
            resume_download_name: "Resume.pdf".to_string(),
            port: 5000,
            reset_db: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Ok(minutes) = env::var("JWT_EXP_MINUTES") {
            if let Ok(val) = minutes.parse::<i64>() {
                config.jwt_exp_minutes = val;
            }
        }
        if let Ok(username) = env::var("ADMIN_USERNAME") {
            config.admin_username = username;
        }
        if let Ok(password) = env::var("ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Ok(email) = env::var("ADMIN_EMAIL") {
            config.admin_email = email;
        }

        // CORS_ORIGINS - comma-separated; FRONTEND_ORIGIN is the single-origin form
        if let Ok(origins) = env::var("CORS_ORIGINS").or_else(|_| env::var("FRONTEND_ORIGIN")) {
            config.cors_origins = parse_origins(&origins);
        }

        if let Ok(path) = env::var("RESUME_PATH") {
            config.resume_path = PathBuf::from(path);
        }
        if let Ok(name) = env::var("RESUME_DOWNLOAD_NAME") {
            config.resume_download_name = name;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.port = val;
            }
        }
        config.reset_db = env::var("RESET_DB")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        config
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
