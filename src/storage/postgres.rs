// src/storage/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, migrate::MigrateError};

use super::{QuizStore, StoreError};
use crate::models::{
    quiz_result::{NewQuizResult, QuizResult},
    user::{NewUser, User},
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, full_name, nickname)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, full_name, nickname, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.nickname)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                StoreError::Conflict(format!("Email '{}' is already registered", user.email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, full_name, nickname, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, full_name, nickname, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, full_name, nickname, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn insert_result(
        &self,
        user_id: i64,
        result: NewQuizResult,
    ) -> Result<QuizResult, StoreError> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (user_id, score, total, category, difficulty)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, score, total, category, difficulty, created_at
            "#,
        )
        .bind(user_id)
        .bind(result.score)
        .bind(result.total)
        .bind(result.category)
        .bind(result.difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn results_for_user(&self, user_id: i64) -> Result<Vec<QuizResult>, StoreError> {
        let rows = sqlx::query_as::<_, QuizResult>(
            "SELECT id, user_id, score, total, category, difficulty, created_at FROM quiz_results WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn all_results(&self) -> Result<Vec<QuizResult>, StoreError> {
        let rows = sqlx::query_as::<_, QuizResult>(
            "SELECT id, user_id, score, total, category, difficulty, created_at FROM quiz_results ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
