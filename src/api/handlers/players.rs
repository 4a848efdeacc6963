use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, StatsParams};
use crate::api::models::{PlayerItem, PlayerReportResponse, RegisterPlayerRequest};
use crate::database;
use crate::services::recording::{self, RecordingError};
use crate::stats::{self, PlayerReport};

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let players = match database::players::list_all(&mut conn) {
        Ok(players) => players,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    let items: Vec<PlayerItem> = players
        .into_iter()
        .map(|p| PlayerItem {
            player_id: p.id,
            nickname: p.nickname,
        })
        .collect();

    Json(items).into_response()
}

pub async fn register_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterPlayerRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match recording::register_player(&mut conn, &request.nickname) {
        Ok(player) => (
            StatusCode::CREATED,
            Json(PlayerItem {
                player_id: player.id,
                nickname: player.nickname,
            }),
        )
            .into_response(),
        Err(RecordingError::DuplicateNickname(nickname)) => (
            StatusCode::CONFLICT,
            format!("player '{nickname}' already exists"),
        )
            .into_response(),
        Err(e) if e.is_validation() => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage Error: {e}"))
            .into_response(),
    }
}

/// Full per-player statistics report. An unknown nickname is not an
/// error: it yields the zeroed report.
pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    Path(nickname): Path<String>,
    Query(params): Query<StatsParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or(state.config.stats.top_opponents_limit)
        .clamp(1, state.config.stats.max_top_opponents_limit);

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let player = match database::players::find_by_nickname(&mut conn, &nickname) {
        Ok(player) => player,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    let Some(player) = player else {
        return Json(PlayerReportResponse::from(PlayerReport::empty(&nickname))).into_response();
    };

    // One store round-trip: the same newest-first history feeds both
    // the summary and the opponent ranking.
    let matches = match database::matches::find_by_participant(&mut conn, player.id) {
        Ok(matches) => matches,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    let report = stats::build_report(&player.nickname, &matches, player.id, limit);
    Json(PlayerReportResponse::from(report)).into_response()
}
