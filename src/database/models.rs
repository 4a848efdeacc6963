use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    pub created_at: Option<NaiveDateTime>,
}

/// One row of the matches table before its participants are joined on.
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub is_team: bool,
    pub outcome: String,
    pub occurred_at: NaiveDateTime,
}

/// One participant row joined to its player record.
#[derive(Debug, Clone)]
pub struct ParticipantRow {
    pub match_id: i64,
    pub player_id: i64,
    pub nickname: String,
    pub side: i64,
}
