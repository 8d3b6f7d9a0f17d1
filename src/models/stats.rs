// src/models/stats.rs

use serde::{Deserialize, Serialize};

/// Per-user statistics shown on the stats page and the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub nickname: String,
    pub total_score: i64,
    pub total_questions: i64,
    /// Rounded accuracy, 0..=100.
    pub percent: i64,
    pub best_category: Option<BestCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestCategory {
    pub category: String,
    pub percent: i64,
}

/// A summary with its 1-based position on a ranked board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: UserSummary,
}

/// Which scoreboard the client wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreboardView {
    /// One unranked summary per user.
    #[default]
    All,
    /// Ranked by total correct answers.
    Total,
    /// Ranked by accuracy, for users with enough attempts.
    Accuracy,
}

/// Query parameters for `GET /quiz/scoreboard`.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreboardParams {
    #[serde(default)]
    pub view: ScoreboardView,
    pub min_questions: Option<i64>,
}
