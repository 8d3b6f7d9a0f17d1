// src/storage/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{QuizStore, StoreError};
use crate::models::{
    quiz_result::{NewQuizResult, QuizResult},
    user::{NewUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    results: Vec<QuizResult>,
    last_user_id: i64,
    last_result_id: i64,
}

/// Process-local store. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        // Check and insert under one lock, like the unique index does.
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }

        tables.last_user_id += 1;
        let row = User {
            id: tables.last_user_id,
            email: user.email,
            password: user.password_hash,
            full_name: user.full_name,
            nickname: user.nickname,
            created_at: Some(Utc::now()),
        };
        tables.users.push(row.clone());

        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        // Ids are handed out in increasing order, so insertion order is id order.
        Ok(self.tables.read().await.users.clone())
    }

    async fn insert_result(
        &self,
        user_id: i64,
        result: NewQuizResult,
    ) -> Result<QuizResult, StoreError> {
        let mut tables = self.tables.write().await;

        tables.last_result_id += 1;
        let row = QuizResult {
            id: tables.last_result_id,
            user_id,
            score: result.score,
            total: result.total,
            category: result.category,
            difficulty: result.difficulty,
            created_at: Some(Utc::now()),
        };
        tables.results.push(row.clone());

        Ok(row)
    }

    async fn results_for_user(&self, user_id: i64) -> Result<Vec<QuizResult>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn all_results(&self) -> Result<Vec<QuizResult>, StoreError> {
        Ok(self.tables.read().await.results.clone())
    }
}
