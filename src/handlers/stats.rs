// src/handlers/stats.rs

use std::collections::BTreeMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    models::stats::{ScoreboardParams, ScoreboardView},
    services::{
        ranking::{MIN_ACCURACY_QUESTIONS, rank_by_accuracy, rank_by_total},
        stats::{compute_scoreboard, compute_user_summary, group_by_user},
    },
    storage::SharedStore,
    utils::jwt::Claims,
};

/// Stats for the logged-in user: totals, accuracy and best category.
pub async fn get_stats(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = store
        .find_user(user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let results = store.results_for_user(user_id).await?;
    let summary = compute_user_summary(&results, &user.nickname).map_err(|e| {
        tracing::error!("Failed to summarize quiz results for user {}: {}", user_id, e);
        AppError::from(e)
    })?;

    Ok(Json(summary))
}

/// Scoreboard over every registered user.
///
/// `view=all` (default) returns one summary per user in id order;
/// `view=total` and `view=accuracy` return ranked boards.
pub async fn get_scoreboard(
    State(store): State<SharedStore>,
    Query(params): Query<ScoreboardParams>,
) -> Result<Response, AppError> {
    let users = store.list_users().await?;
    let results = store.all_results().await?;

    let nicknames: BTreeMap<i64, String> = users
        .into_iter()
        .map(|user| (user.id, user.nickname))
        .collect();

    let summaries = compute_scoreboard(&group_by_user(results), &nicknames).map_err(|e| {
        tracing::error!("Failed to build scoreboard: {}", e);
        AppError::from(e)
    })?;

    let response = match params.view {
        ScoreboardView::All => Json(summaries).into_response(),
        ScoreboardView::Total => Json(rank_by_total(summaries)).into_response(),
        ScoreboardView::Accuracy => {
            let min_questions = params.min_questions.unwrap_or(MIN_ACCURACY_QUESTIONS);
            Json(rank_by_accuracy(summaries, min_questions)).into_response()
        }
    };

    Ok(response)
}
