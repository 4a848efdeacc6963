use log::warn;

use crate::domain::{Match, PlayerId};
use crate::stats::opponents::opponents_of;
use crate::stats::outcome::classify;
use crate::stats::types::{MatchResult, PlayerSummary};

/// Fold a player's full match history (newest first) into summary
/// counters. Unscored matches count towards `matches_count` but not
/// towards wins/losses/draws; matches the classifier rejects are logged
/// and excluded from every counter.
pub fn summarize(matches: &[Match], player_id: PlayerId, nickname: &str) -> PlayerSummary {
    let mut summary = PlayerSummary::empty(nickname);

    for m in matches {
        let result = match classify(m, player_id) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping match in player summary: {e}");
                continue;
            }
        };

        summary.matches_count += 1;
        match result {
            MatchResult::Win => summary.wins += 1,
            MatchResult::Loss => summary.losses += 1,
            MatchResult::Draw => summary.draws += 1,
            MatchResult::Unscored => {}
        }

        // The input is newest first, so the first counted match is the
        // most recent one.
        if summary.matches_count == 1 {
            summary.last_match_date = Some(m.occurred_at);
            summary.last_match_outcome = Some(m.outcome_token());
            summary.last_match_opponent = opponents_of(m, player_id)
                .first()
                .map(|p| p.nickname.clone());
        }
    }

    summary.win_ratio = win_ratio(summary.wins, summary.matches_count);
    summary
}

/// `wins / matches * 100`, rounded to 2 decimals. The denominator
/// deliberately includes unscored matches.
fn win_ratio(wins: u32, matches_count: u32) -> f64 {
    if matches_count == 0 {
        return 0.0;
    }
    let ratio = wins as f64 / matches_count as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchSides, Outcome, Participant, Side};
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn participant(id: PlayerId, nickname: &str) -> Participant {
        Participant {
            id,
            nickname: nickname.to_string(),
        }
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap()
    }

    fn singles(id: i64, outcome: Outcome, day: u32) -> Match {
        Match {
            id,
            sides: MatchSides::Singles {
                one: participant(1, "alice"),
                two: participant(2, "bob"),
            },
            outcome,
            occurred_at: at(day),
        }
    }

    #[test]
    fn single_win_gives_full_ratio() {
        let matches = vec![singles(1, Outcome::Winner(Side::One), 10)];
        let summary = summarize(&matches, 1, "alice");

        assert_eq!(summary.matches_count, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.draws, 0);
        assert_eq!(summary.win_ratio, 100.0);
        assert_eq!(summary.last_match_date, Some(at(10)));
        assert_eq!(summary.last_match_outcome, Some("player1"));
        assert_eq!(summary.last_match_opponent, Some("bob".to_string()));
    }

    #[test]
    fn unscored_counts_in_denominator_only() {
        let matches = vec![
            singles(1, Outcome::Winner(Side::One), 12),
            singles(2, Outcome::Unscored, 11),
            singles(3, Outcome::Winner(Side::Two), 10),
        ];
        let summary = summarize(&matches, 1, "alice");

        assert_eq!(summary.matches_count, 3);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.draws, 0);
        // 1/3 of the matches won, unscored match included in the denominator
        assert_eq!(summary.win_ratio, 33.33);
    }

    #[test]
    fn counters_sum_below_matches_count_iff_unscored_present() {
        let matches = vec![
            singles(1, Outcome::Draw, 12),
            singles(2, Outcome::Unscored, 11),
        ];
        let summary = summarize(&matches, 1, "alice");
        assert!(summary.wins + summary.losses + summary.draws < summary.matches_count);

        let matches = vec![singles(1, Outcome::Draw, 12)];
        let summary = summarize(&matches, 1, "alice");
        assert_eq!(
            summary.wins + summary.losses + summary.draws,
            summary.matches_count
        );
    }

    #[test]
    fn empty_history_is_all_zeroes() {
        let summary = summarize(&[], 1, "alice");
        assert_eq!(summary, PlayerSummary::empty("alice"));
    }

    #[test]
    fn last_match_fields_come_from_newest_entry() {
        let matches = vec![
            singles(2, Outcome::Unscored, 20),
            singles(1, Outcome::Winner(Side::One), 10),
        ];
        let summary = summarize(&matches, 2, "bob");

        assert_eq!(summary.last_match_date, Some(at(20)));
        assert_eq!(summary.last_match_outcome, Some("none"));
        assert_eq!(summary.last_match_opponent, Some("alice".to_string()));
    }

    #[test]
    fn team_outcome_token_reported_for_team_last_match() {
        let m = Match {
            id: 7,
            sides: MatchSides::Teams {
                one: vec![participant(1, "alice"), participant(3, "carol")],
                two: vec![participant(2, "bob"), participant(4, "dan")],
            },
            outcome: Outcome::Winner(Side::Two),
            occurred_at: at(15),
        };
        let summary = summarize(std::slice::from_ref(&m), 1, "alice");

        assert_eq!(summary.losses, 1);
        assert_eq!(summary.last_match_outcome, Some("team2"));
        assert_eq!(summary.last_match_opponent, Some("bob".to_string()));
    }

    #[test]
    fn malformed_match_excluded_from_all_counters() {
        let foreign = Match {
            id: 9,
            sides: MatchSides::Singles {
                one: participant(2, "bob"),
                two: participant(4, "dan"),
            },
            outcome: Outcome::Winner(Side::One),
            occurred_at: at(25),
        };
        let matches = vec![foreign, singles(1, Outcome::Winner(Side::One), 10)];
        let summary = summarize(&matches, 1, "alice");

        assert_eq!(summary.matches_count, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.win_ratio, 100.0);
        // last-match fields skip the excluded row too
        assert_eq!(summary.last_match_date, Some(at(10)));
    }
}
