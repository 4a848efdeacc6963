use crate::domain::{Match, PlayerId};
use crate::stats::opponents;
use crate::stats::summary;
use crate::stats::types::PlayerReport;

/// Merge summary and opponent ranking into the per-player report. The
/// same newest-first match slice feeds both computations, so the store
/// is queried once per report.
pub fn build_report(
    nickname: &str,
    matches: &[Match],
    player_id: PlayerId,
    top_limit: usize,
) -> PlayerReport {
    PlayerReport {
        summary: summary::summarize(matches, player_id, nickname),
        ranking: opponents::rank(matches, player_id, top_limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchSides, Outcome, Participant, Side};
    use crate::stats::opponents::DEFAULT_TOP_OPPONENTS;
    use crate::stats::types::{Nemesis, Victim};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn participant(id: PlayerId, nickname: &str) -> Participant {
        Participant {
            id,
            nickname: nickname.to_string(),
        }
    }

    fn history() -> Vec<Match> {
        let date = |day: u32| {
            NaiveDate::from_ymd_opt(2024, 7, day)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap()
        };
        vec![
            Match {
                id: 3,
                sides: MatchSides::Teams {
                    one: vec![participant(1, "alice"), participant(3, "carol")],
                    two: vec![participant(2, "bob"), participant(4, "dan")],
                },
                outcome: Outcome::Winner(Side::Two),
                occurred_at: date(3),
            },
            Match {
                id: 2,
                sides: MatchSides::Singles {
                    one: participant(1, "alice"),
                    two: participant(2, "bob"),
                },
                outcome: Outcome::Winner(Side::One),
                occurred_at: date(2),
            },
            Match {
                id: 1,
                sides: MatchSides::Singles {
                    one: participant(1, "alice"),
                    two: participant(2, "bob"),
                },
                outcome: Outcome::Winner(Side::One),
                occurred_at: date(1),
            },
        ]
    }

    #[test]
    fn report_merges_summary_and_ranking() {
        let matches = history();
        let report = build_report("alice", &matches, 1, DEFAULT_TOP_OPPONENTS);

        assert_eq!(report.summary.matches_count, 3);
        assert_eq!(report.summary.wins, 2);
        assert_eq!(report.summary.losses, 1);
        assert_eq!(report.summary.win_ratio, 66.67);
        assert_eq!(report.summary.last_match_outcome, Some("team2"));

        assert_eq!(
            report.ranking.victim,
            Some(Victim {
                nickname: "bob".to_string(),
                wins: 2,
                total: 3
            })
        );
        // bob and dan both inflicted one loss; bob has more games together
        assert_eq!(
            report.ranking.nemesis,
            Some(Nemesis {
                nickname: "bob".to_string(),
                losses: 1,
                total: 3
            })
        );
        assert_eq!(report.ranking.top_opponents[0].nickname, "bob");
    }

    #[test]
    fn report_is_idempotent() {
        let matches = history();
        let first = build_report("alice", &matches, 1, DEFAULT_TOP_OPPONENTS);
        let second = build_report("alice", &matches, 1, DEFAULT_TOP_OPPONENTS);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_history_yields_empty_report() {
        let report = build_report("ghost", &[], 99, DEFAULT_TOP_OPPONENTS);
        assert_eq!(report, PlayerReport::empty("ghost"));
    }
}
