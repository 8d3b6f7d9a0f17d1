// src/services/ranking.rs

use std::cmp::Reverse;

use crate::models::stats::{RankedEntry, UserSummary};

/// Users need this many attempted questions to appear on the accuracy board.
pub const MIN_ACCURACY_QUESTIONS: i64 = 10;

fn assign_ranks(sorted: Vec<UserSummary>) -> Vec<RankedEntry> {
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedEntry {
            rank: i + 1,
            summary,
        })
        .collect()
}

/// Most correct answers first. Among equals, the user who needed fewer
/// questions ranks higher.
pub fn rank_by_total(mut summaries: Vec<UserSummary>) -> Vec<RankedEntry> {
    summaries.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then(a.total_questions.cmp(&b.total_questions))
            .then_with(|| a.nickname.cmp(&b.nickname))
    });
    assign_ranks(summaries)
}

/// Highest accuracy first, among users with at least `min_questions`
/// attempted. Equal accuracy goes to the larger sample.
pub fn rank_by_accuracy(summaries: Vec<UserSummary>, min_questions: i64) -> Vec<RankedEntry> {
    let mut eligible: Vec<UserSummary> = summaries
        .into_iter()
        .filter(|s| s.total_questions >= min_questions)
        .collect();
    eligible.sort_by_key(|s| {
        (
            Reverse(s.percent),
            Reverse(s.total_questions),
            s.nickname.clone(),
        )
    });
    assign_ranks(eligible)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(nickname: &str, total_score: i64, total_questions: i64, percent: i64) -> UserSummary {
        UserSummary {
            nickname: nickname.to_string(),
            total_score,
            total_questions,
            percent,
            best_category: None,
        }
    }

    fn nicknames(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.summary.nickname.as_str()).collect()
    }

    #[test]
    fn test_rank_by_total() {
        let board = rank_by_total(vec![
            summary("carol", 12, 40, 30),
            summary("alice", 30, 50, 60),
            summary("bob", 12, 20, 60),
            summary("dave", 0, 0, 0),
        ]);

        assert_eq!(nicknames(&board), vec!["alice", "bob", "carol", "dave"]);
        let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rank_by_accuracy_filters_small_samples() {
        let board = rank_by_accuracy(
            vec![
                summary("lucky", 3, 3, 100),
                summary("steady", 45, 50, 90),
                summary("solid", 9, 10, 90),
                summary("learner", 5, 10, 50),
            ],
            MIN_ACCURACY_QUESTIONS,
        );

        assert_eq!(nicknames(&board), vec!["steady", "solid", "learner"]);
        assert_eq!(board[0].rank, 1);
    }

    #[test]
    fn test_rank_by_accuracy_without_threshold() {
        let board = rank_by_accuracy(
            vec![summary("zed", 1, 2, 50), summary("amy", 1, 2, 50)],
            0,
        );

        assert_eq!(nicknames(&board), vec!["amy", "zed"]);
    }

    #[test]
    fn test_ranked_entry_is_flat_json() {
        let board = rank_by_total(vec![summary("alice", 8, 10, 80)]);
        let json = serde_json::to_value(&board[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "rank": 1,
                "nickname": "alice",
                "totalScore": 8,
                "totalQuestions": 10,
                "percent": 80,
                "bestCategory": null,
            })
        );
    }
}
