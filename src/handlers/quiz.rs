// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz_result::SubmitResultRequest,
    services::{
        stats::is_well_formed,
        trivia::{TriviaClient, TriviaQuery},
    },
    storage::SharedStore,
    utils::jwt::Claims,
};

/// Fetches a question set from the trivia API.
///
/// Query params: `amount` (default 10), `category`, `difficulty`, `type`.
pub async fn fetch_questions(
    State(trivia): State<TriviaClient>,
    Query(query): Query<TriviaQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let questions = trivia.fetch(&query).await?;

    Ok(Json(questions))
}

/// Saves a finished quiz for the logged-in user.
///
/// Rows that could not describe a real attempt are rejected here, so the
/// aggregation never has to deal with them.
pub async fn submit_result(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !is_well_formed(req.score, req.total) {
        return Err(AppError::BadRequest(
            "Score must be between 0 and total.".to_string(),
        ));
    }

    let user_id = claims.user_id()?;
    if store.find_user(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let result = store.insert_result(user_id, req.into()).await.map_err(|e| {
        tracing::error!("Failed to save quiz result: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(result)))
}
