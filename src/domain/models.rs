use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type PlayerId = i64;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Recorded result of a match. `Unscored` means no determined result
/// (forfeit, never scored) and counts for nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
    Unscored,
}

impl Outcome {
    /// Canonical token stored in the database, shape-independent.
    pub fn as_db_token(&self) -> &'static str {
        match self {
            Outcome::Winner(Side::One) => "side1",
            Outcome::Winner(Side::Two) => "side2",
            Outcome::Draw => "draw",
            Outcome::Unscored => "none",
        }
    }

    pub fn from_db_token(token: &str) -> Option<Outcome> {
        match token {
            "side1" => Some(Outcome::Winner(Side::One)),
            "side2" => Some(Outcome::Winner(Side::Two)),
            "draw" => Some(Outcome::Draw),
            "none" => Some(Outcome::Unscored),
            _ => None,
        }
    }

    /// Parse a wire token scoped to the match shape: `player1`/`player2`
    /// for singles, `team1`/`team2` for team matches, `draw`/`none` for
    /// both. Tokens outside the shape's vocabulary are rejected.
    pub fn from_wire_token(token: &str, is_team: bool) -> Option<Outcome> {
        match (token, is_team) {
            ("player1", false) | ("team1", true) => Some(Outcome::Winner(Side::One)),
            ("player2", false) | ("team2", true) => Some(Outcome::Winner(Side::Two)),
            ("draw", _) => Some(Outcome::Draw),
            ("none", _) => Some(Outcome::Unscored),
            _ => None,
        }
    }

    /// Shape-scoped wire token, the inverse of `from_wire_token`.
    pub fn as_wire_token(&self, is_team: bool) -> &'static str {
        match (self, is_team) {
            (Outcome::Winner(Side::One), false) => "player1",
            (Outcome::Winner(Side::Two), false) => "player2",
            (Outcome::Winner(Side::One), true) => "team1",
            (Outcome::Winner(Side::Two), true) => "team2",
            (Outcome::Draw, _) => "draw",
            (Outcome::Unscored, _) => "none",
        }
    }
}

/// A match participant, pre-joined to its player record by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub nickname: String,
}

/// The two participant sets of a match. Singles and team matches carry
/// distinct shapes; `Outcome` only names sides, so an outcome token
/// invalid for the shape cannot be expressed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSides {
    Singles {
        one: Participant,
        two: Participant,
    },
    Teams {
        one: Vec<Participant>,
        two: Vec<Participant>,
    },
}

impl MatchSides {
    pub fn is_team(&self) -> bool {
        matches!(self, MatchSides::Teams { .. })
    }

    pub fn participants_on(&self, side: Side) -> &[Participant] {
        match (self, side) {
            (MatchSides::Singles { one, .. }, Side::One) => std::slice::from_ref(one),
            (MatchSides::Singles { two, .. }, Side::Two) => std::slice::from_ref(two),
            (MatchSides::Teams { one, .. }, Side::One) => one,
            (MatchSides::Teams { two, .. }, Side::Two) => two,
        }
    }

    /// Which side the player is on, if any.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        let on = |side: Side| self.participants_on(side).iter().any(|p| p.id == player_id);
        if on(Side::One) {
            Some(Side::One)
        } else if on(Side::Two) {
            Some(Side::Two)
        } else {
            None
        }
    }
}

/// One completed contest, immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub sides: MatchSides,
    pub outcome: Outcome,
    pub occurred_at: NaiveDateTime,
}

impl Match {
    pub fn is_team(&self) -> bool {
        self.sides.is_team()
    }

    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        self.sides.side_of(player_id)
    }

    pub fn outcome_token(&self) -> &'static str {
        self.outcome.as_wire_token(self.is_team())
    }
}
