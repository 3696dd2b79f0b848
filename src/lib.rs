pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod insights;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::insights::InsightDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub insights: InsightDispatcher,
}
