// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quiz_results' table in the database.
/// One completed quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,

    /// Correct answers.
    pub score: i64,

    /// Questions attempted.
    pub total: i64,

    /// Trivia category label, if the quiz was restricted to one.
    pub category: Option<String>,

    /// Stored for display only; never aggregated.
    pub difficulty: Option<String>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Row data for inserting a quiz result.
#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub score: i64,
    pub total: i64,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

/// DTO for submitting a finished quiz.
///
/// A quiz never has more questions than one trivia fetch returns (50).
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitResultRequest {
    #[validate(range(min = 0, max = 50, message = "Score must be between 0 and 50"))]
    pub score: i64,
    #[validate(range(min = 0, max = 50, message = "Total must be between 0 and 50"))]
    pub total: i64,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 20))]
    pub difficulty: Option<String>,
}

impl From<SubmitResultRequest> for NewQuizResult {
    fn from(req: SubmitResultRequest) -> Self {
        Self {
            score: req.score,
            total: req.total,
            category: req.category.filter(|c| !c.is_empty()),
            difficulty: req.difficulty.filter(|d| !d.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(score: i64, total: i64) -> SubmitResultRequest {
        SubmitResultRequest {
            score,
            total,
            category: Some("Science".to_string()),
            difficulty: None,
        }
    }

    #[test]
    fn test_submit_bounds() {
        assert!(request(50, 50).validate().is_ok());
        assert!(request(0, 0).validate().is_ok());

        let errors = request(10, 51).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("total"));

        let errors = request(i64::MAX, i64::MAX).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("score"));
        assert!(errors.field_errors().contains_key("total"));
    }

    #[test]
    fn test_blank_labels_dropped() {
        let mut req = request(3, 5);
        req.category = Some(String::new());

        let row: NewQuizResult = req.into();
        assert_eq!(row.category, None);
    }
}
