// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::AuthService;
use crate::common::config::AppConfig;

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    /// Held from the sibling-order check until the write lands
    pub order_writes: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let auth = AuthService::new(&config.jwt_secret, config.jwt_exp_minutes);
        Self {
            db,
            config: Arc::new(config),
            auth,
            order_writes: Arc::new(Mutex::new(())),
        }
    }
}
