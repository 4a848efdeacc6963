use chrono::NaiveDateTime;

/// Result of one match relative to a reference player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
    Unscored,
}

impl MatchResult {
    pub fn as_str(&self) -> &str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
            MatchResult::Draw => "draw",
            MatchResult::Unscored => "unscored",
        }
    }
}

/// Running totals for one player over their whole match history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub nickname: String,
    pub matches_count: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Percentage in [0, 100], rounded to 2 decimal places. The
    /// denominator includes unscored matches.
    pub win_ratio: f64,
    pub last_match_date: Option<NaiveDateTime>,
    pub last_match_outcome: Option<&'static str>,
    pub last_match_opponent: Option<String>,
}

impl PlayerSummary {
    pub fn empty(nickname: &str) -> Self {
        Self {
            nickname: nickname.to_string(),
            matches_count: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_ratio: 0.0,
            last_match_date: None,
            last_match_outcome: None,
            last_match_opponent: None,
        }
    }
}

/// Per-opponent counters, all relative to the reference player:
/// `wins` = times the player beat this opponent, `losses` = times the
/// player lost to them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpponentRecord {
    pub games_together: u32,
    pub wins: u32,
    pub losses: u32,
}

/// One entry of the most-faced-opponents list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentStanding {
    pub nickname: String,
    pub games_together: u32,
}

/// The opponent who beats the player most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nemesis {
    pub nickname: String,
    pub losses: u32,
    pub total: u32,
}

/// The opponent the player beats most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victim {
    pub nickname: String,
    pub wins: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentRanking {
    pub nemesis: Option<Nemesis>,
    pub victim: Option<Victim>,
    pub top_opponents: Vec<OpponentStanding>,
}

impl OpponentRanking {
    pub fn empty() -> Self {
        Self {
            nemesis: None,
            victim: None,
            top_opponents: Vec::new(),
        }
    }
}

/// The full per-player report: summary and ranking merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub summary: PlayerSummary,
    pub ranking: OpponentRanking,
}

impl PlayerReport {
    /// Sentinel for unknown nicknames: all counts zero, no error.
    pub fn empty(nickname: &str) -> Self {
        Self {
            summary: PlayerSummary::empty(nickname),
            ranking: OpponentRanking::empty(),
        }
    }
}
