use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::warn;
use rusqlite::params;

use super::connection::DbConn;
use super::models::{MatchRow, ParticipantRow};
use crate::domain::{Match, MatchSides, Outcome, Participant, PlayerId};

pub fn insert_singles(
    conn: &mut DbConn,
    player1_id: PlayerId,
    player2_id: PlayerId,
    outcome: Outcome,
    occurred_at: NaiveDateTime,
) -> Result<i64> {
    insert_with_sides(conn, false, &[player1_id], &[player2_id], outcome, occurred_at)
}

pub fn insert_team(
    conn: &mut DbConn,
    team1: &[PlayerId],
    team2: &[PlayerId],
    outcome: Outcome,
    occurred_at: NaiveDateTime,
) -> Result<i64> {
    insert_with_sides(conn, true, team1, team2, outcome, occurred_at)
}

/// Match row plus its participant rows go in as one transaction, so a
/// half-recorded match can never be observed.
fn insert_with_sides(
    conn: &mut DbConn,
    is_team: bool,
    side1: &[PlayerId],
    side2: &[PlayerId],
    outcome: Outcome,
    occurred_at: NaiveDateTime,
) -> Result<i64> {
    let tx = conn.transaction().context("Failed to open transaction")?;

    let match_id: i64 = tx
        .query_row(
            "INSERT INTO matches (is_team, outcome, occurred_at) VALUES (?1, ?2, ?3) RETURNING id",
            params![is_team, outcome.as_db_token(), occurred_at],
            |row| row.get(0),
        )
        .context("Failed to insert match")?;

    for (side, players) in [(1, side1), (2, side2)] {
        for player_id in players {
            tx.execute(
                "INSERT INTO match_players (match_id, player_id, side) VALUES (?1, ?2, ?3)",
                params![match_id, player_id, side],
            )
            .with_context(|| format!("Failed to insert participant {player_id}"))?;
        }
    }

    tx.commit().context("Failed to commit match")?;
    Ok(match_id)
}

/// All matches the player took part in, newest first, with every
/// participant joined to its player record.
pub fn find_by_participant(conn: &mut DbConn, player_id: PlayerId) -> Result<Vec<Match>> {
    let rows = query_match_rows(
        conn,
        "SELECT m.id, m.is_team, m.outcome, m.occurred_at
         FROM matches m
         JOIN match_players mp ON mp.match_id = m.id
         WHERE mp.player_id = ?1
         ORDER BY m.occurred_at DESC, m.id DESC",
        params![player_id],
    )?;

    let participants = query_participant_rows(
        conn,
        "SELECT mp.match_id, mp.player_id, p.nickname, mp.side
         FROM match_players mp
         JOIN players p ON p.id = mp.player_id
         WHERE mp.match_id IN (SELECT match_id FROM match_players WHERE player_id = ?1)
         ORDER BY mp.match_id, mp.side, p.nickname",
        params![player_id],
    )?;

    Ok(assemble_matches(rows, participants))
}

/// Every recorded match, newest first.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<Match>> {
    let rows = query_match_rows(
        conn,
        "SELECT id, is_team, outcome, occurred_at
         FROM matches
         ORDER BY occurred_at DESC, id DESC",
        params![],
    )?;

    let participants = query_participant_rows(
        conn,
        "SELECT mp.match_id, mp.player_id, p.nickname, mp.side
         FROM match_players mp
         JOIN players p ON p.id = mp.player_id
         ORDER BY mp.match_id, mp.side, p.nickname",
        params![],
    )?;

    Ok(assemble_matches(rows, participants))
}

fn query_match_rows(
    conn: &mut DbConn,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<MatchRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query matches")?;
    Ok(rows)
}

fn query_participant_rows(
    conn: &mut DbConn,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<ParticipantRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse_participant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query match participants")?;
    Ok(rows)
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        is_team: row.get(1)?,
        outcome: row.get(2)?,
        occurred_at: row.get(3)?,
    })
}

fn parse_participant_row(row: &rusqlite::Row) -> rusqlite::Result<ParticipantRow> {
    Ok(ParticipantRow {
        match_id: row.get(0)?,
        player_id: row.get(1)?,
        nickname: row.get(2)?,
        side: row.get(3)?,
    })
}

/// Zip match rows with their participant rows, preserving the match
/// ordering of `rows`. Rows that do not form a valid match (unknown
/// outcome token, wrong participant counts) are logged and skipped
/// rather than aborting the whole query.
fn assemble_matches(rows: Vec<MatchRow>, participants: Vec<ParticipantRow>) -> Vec<Match> {
    let mut by_match: HashMap<i64, Vec<ParticipantRow>> = HashMap::new();
    for p in participants {
        by_match.entry(p.match_id).or_default().push(p);
    }

    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            let participants = by_match.remove(&id).unwrap_or_default();
            match assemble_match(row, participants) {
                Some(m) => Some(m),
                None => {
                    warn!("Skipping malformed match row {id}");
                    None
                }
            }
        })
        .collect()
}

fn assemble_match(row: MatchRow, participants: Vec<ParticipantRow>) -> Option<Match> {
    let outcome = Outcome::from_db_token(&row.outcome)?;

    let mut one = Vec::new();
    let mut two = Vec::new();
    for p in participants {
        let participant = Participant {
            id: p.player_id,
            nickname: p.nickname,
        };
        match p.side {
            1 => one.push(participant),
            2 => two.push(participant),
            _ => return None,
        }
    }

    let sides = if row.is_team {
        if one.is_empty() || two.is_empty() {
            return None;
        }
        MatchSides::Teams { one, two }
    } else {
        if one.len() != 1 || two.len() != 1 {
            return None;
        }
        MatchSides::Singles {
            one: one.pop()?,
            two: two.pop()?,
        }
    };

    Some(Match {
        id: row.id,
        sides,
        outcome,
        occurred_at: row.occurred_at,
    })
}
