use crate::domain::{Match, Outcome, PlayerId};
use crate::errors::DataIntegrityError;
use crate::stats::types::MatchResult;

/// Classify one match relative to a player. Pure; the same inputs
/// always give the same result.
///
/// The player must actually be a participant; a non-participant is a
/// `DataIntegrityError` rather than a silent loss, so callers can log
/// and skip the row.
pub fn classify(m: &Match, player_id: PlayerId) -> Result<MatchResult, DataIntegrityError> {
    let side = m
        .side_of(player_id)
        .ok_or(DataIntegrityError::NotAParticipant {
            match_id: m.id,
            player_id,
        })?;

    let result = match m.outcome {
        Outcome::Draw => MatchResult::Draw,
        Outcome::Unscored => MatchResult::Unscored,
        Outcome::Winner(winner) if winner == side => MatchResult::Win,
        Outcome::Winner(_) => MatchResult::Loss,
    };
    Ok(result)
}
