use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{MatchItem, RecordMatchRequest, RecordedMatchResponse};
use crate::database;
use crate::services::recording;

pub async fn get_matches(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let matches = match database::matches::list_all(&mut conn) {
        Ok(matches) => matches,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response()
        }
    };

    let items: Vec<MatchItem> = matches.iter().map(MatchItem::from).collect();
    Json(items).into_response()
}

pub async fn record_match(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordMatchRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let result = match &request {
        RecordMatchRequest::Singles {
            player1,
            player2,
            outcome,
            date,
            time,
        } => recording::record_singles(
            &mut conn,
            player1,
            player2,
            outcome,
            date.as_deref(),
            time.as_deref(),
        ),
        RecordMatchRequest::Team {
            team1,
            team2,
            outcome,
            date,
            time,
        } => recording::record_team(
            &mut conn,
            team1,
            team2,
            outcome,
            date.as_deref(),
            time.as_deref(),
        ),
    };

    match result {
        Ok(match_id) => (
            StatusCode::CREATED,
            Json(RecordedMatchResponse { match_id }),
        )
            .into_response(),
        Err(e) if e.is_validation() => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage Error: {e}"))
            .into_response(),
    }
}
