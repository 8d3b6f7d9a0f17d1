// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, NewUser, RegisterRequest},
    storage::SharedStore,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created with a confirmation message.
pub async fn register(
    State(store): State<SharedStore>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.password != payload.password_repeat {
        return Err(AppError::BadRequest(
            "Your passwords do not match!".to_string(),
        ));
    }

    if store.find_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict(
            "You have registered this email before. Please log in!".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = store
        .create_user(NewUser {
            email: payload.email,
            password_hash,
            full_name: payload.full_name,
            nickname: payload.nickname,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        })?;

    tracing::info!("Registered user {} ({})", user.id, user.nickname);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": format!("Your account has been created with {}", user.email),
        })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Verifies the email and password against the store.
/// If valid, signs a JWT token carrying the user's ID.
pub async fn login(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = store
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| {
            AppError::AuthError(
                "An account with that email does not exist. Please register an account."
                    .to_string(),
            )
        })?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::AuthError("Your password is incorrect.".to_string()));
    }

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user,
    })))
}
