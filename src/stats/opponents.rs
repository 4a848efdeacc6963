use std::collections::BTreeMap;

use log::warn;

use crate::domain::{Match, Participant, PlayerId};
use crate::stats::outcome::classify;
use crate::stats::types::{
    MatchResult, Nemesis, OpponentRanking, OpponentRecord, OpponentStanding, Victim,
};

pub const DEFAULT_TOP_OPPONENTS: usize = 5;

/// Participants on the other side of the match. Teammates are not
/// opponents; an empty slice is returned for players that are not
/// actually in the match.
pub fn opponents_of(m: &Match, player_id: PlayerId) -> &[Participant] {
    match m.side_of(player_id) {
        Some(side) => m.sides.participants_on(side.opposite()),
        None => &[],
    }
}

/// Group the player's matches by opponent and pick nemesis, victim and
/// the `limit` most-faced opponents.
///
/// Tie-breaks are deterministic: nemesis/victim take the maximum
/// `(losses-or-wins, games_together)` tuple with nickname ascending as
/// the final tie-break (the map is scanned in nickname order and only a
/// strictly greater tuple replaces the current best); top opponents are
/// sorted by games together descending, nickname ascending.
pub fn rank(matches: &[Match], player_id: PlayerId, limit: usize) -> OpponentRanking {
    let mut records: BTreeMap<&str, OpponentRecord> = BTreeMap::new();

    for m in matches {
        let result = match classify(m, player_id) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping match in opponent ranking: {e}");
                continue;
            }
        };

        for opponent in opponents_of(m, player_id) {
            let record = records.entry(opponent.nickname.as_str()).or_default();
            record.games_together += 1;
            match result {
                MatchResult::Win => record.wins += 1,
                MatchResult::Loss => record.losses += 1,
                MatchResult::Draw | MatchResult::Unscored => {}
            }
        }
    }

    OpponentRanking {
        nemesis: pick_nemesis(&records),
        victim: pick_victim(&records),
        top_opponents: pick_top_opponents(&records, limit),
    }
}

fn pick_nemesis(records: &BTreeMap<&str, OpponentRecord>) -> Option<Nemesis> {
    let (nickname, record) = max_by_tuple(records, |r| (r.losses, r.games_together))?;
    if record.losses == 0 {
        return None;
    }
    Some(Nemesis {
        nickname: nickname.to_string(),
        losses: record.losses,
        total: record.games_together,
    })
}

fn pick_victim(records: &BTreeMap<&str, OpponentRecord>) -> Option<Victim> {
    let (nickname, record) = max_by_tuple(records, |r| (r.wins, r.games_together))?;
    if record.wins == 0 {
        return None;
    }
    Some(Victim {
        nickname: nickname.to_string(),
        wins: record.wins,
        total: record.games_together,
    })
}

/// First maximum in nickname order, so ties resolve to the
/// alphabetically smallest nickname.
fn max_by_tuple<'a>(
    records: &'a BTreeMap<&str, OpponentRecord>,
    key: impl Fn(&OpponentRecord) -> (u32, u32),
) -> Option<(&'a str, OpponentRecord)> {
    let mut best: Option<(&str, OpponentRecord)> = None;
    for (nickname, record) in records {
        match &best {
            Some((_, current)) if key(record) <= key(current) => {}
            _ => best = Some((*nickname, *record)),
        }
    }
    best
}

fn pick_top_opponents(
    records: &BTreeMap<&str, OpponentRecord>,
    limit: usize,
) -> Vec<OpponentStanding> {
    let mut standings: Vec<OpponentStanding> = records
        .iter()
        .map(|(nickname, record)| OpponentStanding {
            nickname: nickname.to_string(),
            games_together: record.games_together,
        })
        .collect();

    // Stable sort over a nickname-ordered list keeps ties alphabetical.
    standings.sort_by_key(|s| std::cmp::Reverse(s.games_together));
    standings.truncate(limit);
    standings
}
