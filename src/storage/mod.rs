// src/storage/mod.rs

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    quiz_result::{NewQuizResult, QuizResult},
    user::{NewUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was hit (e.g. the email is taken).
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for users and their quiz results.
///
/// Handlers only ever see materialized rows; aggregation happens in
/// `services::stats`.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// All users, ascending by id.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn insert_result(
        &self,
        user_id: i64,
        result: NewQuizResult,
    ) -> Result<QuizResult, StoreError>;

    async fn results_for_user(&self, user_id: i64) -> Result<Vec<QuizResult>, StoreError>;

    async fn all_results(&self) -> Result<Vec<QuizResult>, StoreError>;
}

pub type SharedStore = Arc<dyn QuizStore>;
