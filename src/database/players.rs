use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::Player;

pub fn insert_player(conn: &mut DbConn, nickname: &str) -> Result<Player> {
    let sql = "INSERT INTO players (nickname) VALUES (?1) RETURNING id, nickname, created_at";

    conn.query_row(sql, params![nickname], parse_player_row)
        .with_context(|| format!("Failed to insert player '{nickname}'"))
}

pub fn find_by_nickname(conn: &mut DbConn, nickname: &str) -> Result<Option<Player>> {
    let sql = "SELECT id, nickname, created_at FROM players WHERE nickname = ?1";

    conn.query_row(sql, params![nickname], parse_player_row)
        .optional()
        .context("Failed to query player by nickname")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Player>> {
    let sql = "SELECT id, nickname, created_at FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = "SELECT id, nickname, created_at FROM players ORDER BY nickname";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        nickname: row.get(1)?,
        created_at: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::test_support::memory_pool;

    #[test]
    fn insert_and_find_by_nickname() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        let alice = insert_player(&mut conn, "alice").unwrap();
        assert_eq!(alice.nickname, "alice");

        let found = find_by_nickname(&mut conn, "alice").unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(find_by_nickname(&mut conn, "ghost").unwrap().is_none());
    }

    #[test]
    fn duplicate_nickname_is_rejected() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        insert_player(&mut conn, "alice").unwrap();
        assert!(insert_player(&mut conn, "alice").is_err());
    }

    #[test]
    fn list_all_sorts_by_nickname() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        insert_player(&mut conn, "carol").unwrap();
        insert_player(&mut conn, "alice").unwrap();
        insert_player(&mut conn, "bob").unwrap();

        let nicknames: Vec<String> = list_all(&mut conn)
            .unwrap()
            .into_iter()
            .map(|p| p.nickname)
            .collect();
        assert_eq!(nicknames, vec!["alice", "bob", "carol"]);
    }
}
