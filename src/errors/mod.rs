use thiserror::Error;

use crate::domain::PlayerId;

/// Malformed match data reaching the stats core. Rather than silently
/// scoring such a match as a loss, the offending match is reported so
/// the caller can log it and exclude it from every counter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("player {player_id} is not a participant of match {match_id}")]
    NotAParticipant { match_id: i64, player_id: PlayerId },
}
