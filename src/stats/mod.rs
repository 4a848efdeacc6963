pub mod opponents;
pub mod outcome;
pub mod report;
pub mod summary;
pub mod types;

pub use opponents::{opponents_of, rank, DEFAULT_TOP_OPPONENTS};
pub use outcome::classify;
pub use report::build_report;
pub use summary::summarize;
pub use types::{
    MatchResult, Nemesis, OpponentRanking, OpponentRecord, OpponentStanding, PlayerReport,
    PlayerSummary, Victim,
};
