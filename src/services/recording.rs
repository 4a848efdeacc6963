use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::database::models::Player;
use crate::database::{self, DbConn};
use crate::domain::{Outcome, PlayerId};

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("nickname must not be empty")]
    EmptyNickname,
    #[error("player '{0}' already exists")]
    DuplicateNickname(String),
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("team sides must not be empty")]
    EmptySide,
    #[error("player '{0}' appears more than once in the match")]
    DoubleBooked(String),
    #[error("invalid outcome '{token}' for a {shape} match")]
    InvalidOutcome { token: String, shape: &'static str },
    #[error("invalid date/time '{0}', expected YYYY-MM-DD [HH:MM]")]
    InvalidDateTime(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl RecordingError {
    /// Validation failures are the caller's fault; storage failures are
    /// ours. Handlers map the former to 4xx responses.
    pub fn is_validation(&self) -> bool {
        !matches!(self, RecordingError::Storage(_))
    }
}

pub fn register_player(conn: &mut DbConn, nickname: &str) -> Result<Player, RecordingError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(RecordingError::EmptyNickname);
    }
    if database::players::find_by_nickname(conn, nickname)?.is_some() {
        return Err(RecordingError::DuplicateNickname(nickname.to_string()));
    }

    Ok(database::players::insert_player(conn, nickname)?)
}

pub fn record_singles(
    conn: &mut DbConn,
    player1: &str,
    player2: &str,
    outcome_token: &str,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<i64, RecordingError> {
    ensure_distinct([player1, player2].into_iter())?;

    let outcome = parse_outcome(outcome_token, false)?;
    let occurred_at = parse_occurred_at(date, time)?;
    let player1_id = resolve_player(conn, player1)?;
    let player2_id = resolve_player(conn, player2)?;

    let match_id =
        database::matches::insert_singles(conn, player1_id, player2_id, outcome, occurred_at)?;
    log::info!("Recorded singles match {match_id}: {player1} vs {player2}");
    Ok(match_id)
}

pub fn record_team(
    conn: &mut DbConn,
    team1: &[String],
    team2: &[String],
    outcome_token: &str,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<i64, RecordingError> {
    if team1.is_empty() || team2.is_empty() {
        return Err(RecordingError::EmptySide);
    }
    ensure_distinct(team1.iter().chain(team2).map(String::as_str))?;

    let outcome = parse_outcome(outcome_token, true)?;
    let occurred_at = parse_occurred_at(date, time)?;
    let team1_ids = resolve_players(conn, team1)?;
    let team2_ids = resolve_players(conn, team2)?;

    let match_id =
        database::matches::insert_team(conn, &team1_ids, &team2_ids, outcome, occurred_at)?;
    log::info!(
        "Recorded team match {match_id}: {} vs {} players",
        team1.len(),
        team2.len()
    );
    Ok(match_id)
}

/// Explicit date and optional time, or the moment of recording. A
/// date-only input defaults the time to start of day.
pub fn parse_occurred_at(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<NaiveDateTime, RecordingError> {
    match (date, time) {
        (Some(date), Some(time)) => {
            NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
                .map_err(|_| RecordingError::InvalidDateTime(format!("{date} {time}")))
        }
        (Some(date), None) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is valid"))
            .map_err(|_| RecordingError::InvalidDateTime(date.to_string())),
        (None, _) => Ok(Utc::now().naive_utc()),
    }
}

fn parse_outcome(token: &str, is_team: bool) -> Result<Outcome, RecordingError> {
    Outcome::from_wire_token(token, is_team).ok_or_else(|| RecordingError::InvalidOutcome {
        token: token.to_string(),
        shape: if is_team { "team" } else { "singles" },
    })
}

fn ensure_distinct<'a>(nicknames: impl Iterator<Item = &'a str>) -> Result<(), RecordingError> {
    let mut seen = HashSet::new();
    for nickname in nicknames {
        if !seen.insert(nickname) {
            return Err(RecordingError::DoubleBooked(nickname.to_string()));
        }
    }
    Ok(())
}

fn resolve_player(conn: &mut DbConn, nickname: &str) -> Result<PlayerId, RecordingError> {
    database::players::find_by_nickname(conn, nickname)?
        .map(|p| p.id)
        .ok_or_else(|| RecordingError::UnknownPlayer(nickname.to_string()))
}

fn resolve_players(conn: &mut DbConn, nicknames: &[String]) -> Result<Vec<PlayerId>, RecordingError> {
    nicknames
        .iter()
        .map(|nickname| resolve_player(conn, nickname))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::test_support::memory_pool;
    use crate::domain::Side;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_rejects_empty_and_duplicate_nicknames() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        assert!(matches!(
            register_player(&mut conn, "  "),
            Err(RecordingError::EmptyNickname)
        ));

        register_player(&mut conn, "alice").unwrap();
        assert!(matches!(
            register_player(&mut conn, "alice"),
            Err(RecordingError::DuplicateNickname(_))
        ));
    }

    #[test]
    fn record_singles_happy_path() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        register_player(&mut conn, "alice").unwrap();
        register_player(&mut conn, "bob").unwrap();

        record_singles(
            &mut conn,
            "alice",
            "bob",
            "player1",
            Some("2024-05-01"),
            Some("18:30"),
        )
        .unwrap();

        let matches = database::matches::list_all(&mut conn).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].outcome, Outcome::Winner(Side::One));
        assert_eq!(
            matches[0].occurred_at,
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn record_singles_rejects_self_play() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        register_player(&mut conn, "alice").unwrap();

        assert!(matches!(
            record_singles(&mut conn, "alice", "alice", "draw", None, None),
            Err(RecordingError::DoubleBooked(_))
        ));
    }

    #[test]
    fn record_singles_rejects_team_outcome_token() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        register_player(&mut conn, "alice").unwrap();
        register_player(&mut conn, "bob").unwrap();

        let err = record_singles(&mut conn, "alice", "bob", "team1", None, None).unwrap_err();
        assert!(matches!(err, RecordingError::InvalidOutcome { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn record_singles_rejects_unknown_player() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        register_player(&mut conn, "alice").unwrap();

        assert!(matches!(
            record_singles(&mut conn, "alice", "ghost", "draw", None, None),
            Err(RecordingError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn record_team_rejects_overlapping_sides() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        for nickname in ["alice", "bob", "carol"] {
            register_player(&mut conn, nickname).unwrap();
        }

        let team1 = vec!["alice".to_string(), "bob".to_string()];
        let team2 = vec!["bob".to_string(), "carol".to_string()];
        assert!(matches!(
            record_team(&mut conn, &team1, &team2, "team1", None, None),
            Err(RecordingError::DoubleBooked(_))
        ));
    }

    #[test]
    fn record_team_rejects_empty_side() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        register_player(&mut conn, "alice").unwrap();

        assert!(matches!(
            record_team(&mut conn, &["alice".to_string()], &[], "draw", None, None),
            Err(RecordingError::EmptySide)
        ));
    }

    #[test]
    fn occurred_at_defaults() {
        let date_only = parse_occurred_at(Some("2024-05-01"), None).unwrap();
        assert_eq!(
            date_only,
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        assert!(parse_occurred_at(Some("01-05-2024"), None).is_err());
        assert!(parse_occurred_at(Some("2024-05-01"), Some("25:99")).is_err());

        let before = Utc::now().naive_utc();
        let now = parse_occurred_at(None, None).unwrap();
        assert!(now >= before);
    }
}
