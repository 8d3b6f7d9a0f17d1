// src/utils/hash.rs

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::AppError;

fn hashing_failed(err: password_hash::Error) -> AppError {
    AppError::InternalServerError(format!("password hashing failed: {err}"))
}

/// Argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(hashing_failed)
}

/// `Ok(false)` only for a wrong password. A stored hash that cannot be
/// parsed or checked is a server-side problem and surfaces as an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let stored = PasswordHash::new(stored_hash).map_err(hashing_failed)?;

    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(hashing_failed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_new_salt() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_error() {
        assert!(matches!(
            verify_password("hunter22", "not-a-hash"),
            Err(AppError::InternalServerError(_))
        ));
    }
}
