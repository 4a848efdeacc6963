use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Match, MatchSides, Side};
use crate::stats::PlayerReport;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerItem {
    pub player_id: i64,
    pub nickname: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayerRequest {
    pub nickname: String,
}

/// Body of POST /api/matches, discriminated by `type`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordMatchRequest {
    #[serde(rename_all = "camelCase")]
    Singles {
        player1: String,
        player2: String,
        outcome: String,
        date: Option<String>,
        time: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Team {
        team1: Vec<String>,
        team2: Vec<String>,
        outcome: String,
        date: Option<String>,
        time: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMatchResponse {
    pub match_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    pub match_id: i64,
    pub is_team_match: bool,
    pub outcome: &'static str,
    pub occurred_at: NaiveDateTime,
    pub side1: Vec<String>,
    pub side2: Vec<String>,
}

impl From<&Match> for MatchItem {
    fn from(m: &Match) -> Self {
        let nicknames = |side: Side| {
            m.sides
                .participants_on(side)
                .iter()
                .map(|p| p.nickname.clone())
                .collect()
        };
        Self {
            match_id: m.id,
            is_team_match: matches!(m.sides, MatchSides::Teams { .. }),
            outcome: m.outcome_token(),
            occurred_at: m.occurred_at,
            side1: nicknames(Side::One),
            side2: nicknames(Side::Two),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOpponentItem {
    pub nickname: String,
    pub games_together: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NemesisItem {
    pub nickname: String,
    pub losses: u32,
    pub total: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VictimItem {
    pub nickname: String,
    pub wins: u32,
    pub total: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReportResponse {
    pub nickname: String,
    pub matches_count: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_ratio: f64,
    pub top_opponents: Vec<TopOpponentItem>,
    pub last_match_date: Option<NaiveDateTime>,
    pub last_match_outcome: Option<&'static str>,
    pub last_match_opponent: Option<String>,
    pub nemesis: Option<NemesisItem>,
    pub victim: Option<VictimItem>,
}

impl From<PlayerReport> for PlayerReportResponse {
    fn from(report: PlayerReport) -> Self {
        let summary = report.summary;
        let ranking = report.ranking;
        Self {
            nickname: summary.nickname,
            matches_count: summary.matches_count,
            wins: summary.wins,
            losses: summary.losses,
            draws: summary.draws,
            win_ratio: summary.win_ratio,
            top_opponents: ranking
                .top_opponents
                .into_iter()
                .map(|o| TopOpponentItem {
                    nickname: o.nickname,
                    games_together: o.games_together,
                })
                .collect(),
            last_match_date: summary.last_match_date,
            last_match_outcome: summary.last_match_outcome,
            last_match_opponent: summary.last_match_opponent,
            nemesis: ranking.nemesis.map(|n| NemesisItem {
                nickname: n.nickname,
                losses: n.losses,
                total: n.total,
            }),
            victim: ranking.victim.map(|v| VictimItem {
                nickname: v.nickname,
                wins: v.wins,
                total: v.total,
            }),
        }
    }
}
