// src/services/stats.rs

//! Quiz statistics aggregation.
//!
//! Everything here is a pure function over rows the caller has already
//! loaded. The same per-user reduction backs both the personal stats page
//! and the scoreboard.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use thiserror::Error;

use crate::models::{
    quiz_result::QuizResult,
    stats::{BestCategory, UserSummary},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A row violates `0 <= score <= total`.
    #[error("malformed quiz result {result_id} for user {user_id}: score {score}, total {total}")]
    MalformedResult {
        result_id: i64,
        user_id: i64,
        score: i64,
        total: i64,
    },

    /// A running sum left the `i64` range.
    #[error("quiz totals for user {user_id} are too large to add up")]
    Overflow { user_id: i64 },
}

/// Returns true when `score` and `total` can describe a real quiz attempt.
pub fn is_well_formed(score: i64, total: i64) -> bool {
    score >= 0 && total >= 0 && score <= total
}

fn check_result(result: &QuizResult) -> Result<(), StatsError> {
    if is_well_formed(result.score, result.total) {
        Ok(())
    } else {
        Err(StatsError::MalformedResult {
            result_id: result.id,
            user_id: result.user_id,
            score: result.score,
            total: result.total,
        })
    }
}

/// Rounded percentage of `score` over `total`, halves rounded up.
///
/// Integer arithmetic keeps `1/8` at exactly 12.5 before rounding, so it
/// yields 13. Returns 0 when nothing was attempted.
pub fn percent(score: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let (score, total) = (i128::from(score), i128::from(total));
    ((200 * score + total) / (2 * total)) as i64
}

fn checked_add(acc: i64, value: i64, user_id: i64) -> Result<i64, StatsError> {
    acc.checked_add(value).ok_or(StatsError::Overflow { user_id })
}

fn checked_sum(
    results: &[QuizResult],
    field: impl Fn(&QuizResult) -> i64,
) -> Result<i64, StatsError> {
    results.iter().try_fold(0, |acc, r| checked_add(acc, field(r), r.user_id))
}

/// Running sums for one category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CategoryTally {
    score: i64,
    total: i64,
}

impl CategoryTally {
    fn add(self, result: &QuizResult) -> Result<Self, StatsError> {
        Ok(Self {
            score: checked_add(self.score, result.score, result.user_id)?,
            total: checked_add(self.total, result.total, result.user_id)?,
        })
    }

    /// Accuracy first (exact, via cross-multiplication), then raw score.
    fn cmp_strength(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.score) * i128::from(other.total);
        let rhs = i128::from(other.score) * i128::from(self.total);
        lhs.cmp(&rhs).then(self.score.cmp(&other.score))
    }
}

/// Single pass over the results. Uncategorized rows are dropped here, so
/// they can never seed or win a bucket.
fn tally_categories(
    results: &[QuizResult],
) -> Result<BTreeMap<&str, CategoryTally>, StatsError> {
    let mut tallies: BTreeMap<&str, CategoryTally> = BTreeMap::new();
    for result in results {
        let Some(category) = result.category.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let tally = tallies.entry(category).or_default();
        *tally = tally.add(result)?;
    }
    Ok(tallies)
}

/// Picks the strongest category with at least one attempted question.
///
/// The map iterates in name order and a challenger must be strictly
/// stronger to replace the current pick, so a full tie goes to the
/// alphabetically first category regardless of input order.
fn best_category(tallies: &BTreeMap<&str, CategoryTally>) -> Option<BestCategory> {
    tallies
        .iter()
        .filter(|(_, tally)| tally.total > 0)
        .fold(None, |best: Option<(&str, CategoryTally)>, (&name, &tally)| match best {
            Some((_, current)) if tally.cmp_strength(&current) != Ordering::Greater => best,
            _ => Some((name, tally)),
        })
        .map(|(name, tally)| BestCategory {
            category: name.to_string(),
            percent: percent(tally.score, tally.total),
        })
}

/// Summarizes all quiz results of a single user.
///
/// Every row is checked before anything is computed; the first malformed
/// row fails the whole call, and so does a sum that would overflow.
pub fn compute_user_summary(
    results: &[QuizResult],
    nickname: &str,
) -> Result<UserSummary, StatsError> {
    results.iter().try_for_each(check_result)?;

    let total_score = checked_sum(results, |r| r.score)?;
    let total_questions = checked_sum(results, |r| r.total)?;
    let tallies = tally_categories(results)?;

    Ok(UserSummary {
        nickname: nickname.to_string(),
        total_score,
        total_questions,
        percent: percent(total_score, total_questions),
        best_category: best_category(&tallies),
    })
}

/// Summarizes every known user, in ascending user id order.
///
/// Users listed in `nicknames` without results get an all-zero summary.
/// Results belonging to users missing from `nicknames` are ignored.
pub fn compute_scoreboard(
    results_by_user: &HashMap<i64, Vec<QuizResult>>,
    nicknames: &BTreeMap<i64, String>,
) -> Result<Vec<UserSummary>, StatsError> {
    nicknames
        .iter()
        .map(|(user_id, nickname)| {
            let results = results_by_user
                .get(user_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            compute_user_summary(results, nickname)
        })
        .collect()
}

/// Partitions a flat result list by owner, keeping each user's row order.
pub fn group_by_user(results: Vec<QuizResult>) -> HashMap<i64, Vec<QuizResult>> {
    let mut grouped: HashMap<i64, Vec<QuizResult>> = HashMap::new();
    for result in results {
        grouped.entry(result.user_id).or_default().push(result);
    }
    grouped
}
