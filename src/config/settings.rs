#[derive(Debug, Clone)]
pub struct StatsSettings {
    /// How many most-faced opponents a report lists by default.
    pub top_opponents_limit: usize,
    /// Upper bound a request may raise the limit to.
    pub max_top_opponents_limit: usize,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            top_opponents_limit: 5,
            max_top_opponents_limit: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub default_database_path: &'static str,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            default_database_path: "match_tracker.db",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub stats: StatsSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Passed explicitly (dependency injection) rather than held in a global.
