use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    matches::{get_matches, record_match},
    players::{get_player_stats, get_players, register_player},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players).post(register_player))
        .route("/api/players/:nickname/stats", get(get_player_stats))
        .route("/api/matches", get(get_matches).post(record_match))
        .with_state(state)
}
