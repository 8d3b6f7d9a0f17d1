// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    /// Unique login email.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub full_name: String,

    /// Display name shown on the scoreboard.
    pub nickname: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Row data for inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub nickname: String,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(length(
        min = 2,
        max = 16,
        message = "Nick must be between 2 and 16 characters"
    ))]
    pub nickname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 6))]
    pub password_repeat: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(nickname: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            nickname: nickname.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            password_repeat: "secret1".to_string(),
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(request("ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_long_nickname() {
        let errors = request("a_very_long_nickname", "ada@example.com")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("nickname"));
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let errors = request("ada", "not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "ada@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            full_name: "Ada Lovelace".to_string(),
            nickname: "ada".to_string(),
            created_at: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], "Ada Lovelace");
    }
}
