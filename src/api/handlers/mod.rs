use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::config::settings::AppConfig;

pub mod matches;
pub mod players;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct StatsParams {
    /// Overrides the configured top-opponents list length.
    pub limit: Option<usize>,
}
