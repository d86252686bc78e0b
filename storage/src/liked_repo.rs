//! Liked response repository: audit-style retention of approved answers.
//!
//! Every like event inserts a new row, even for an identical
//! (question, response) pair; lookups pick the best row by usage count.

use crate::error::StorageError;
use crate::models::LikedResponseRecord;
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct LikedResponseRepository {
    pool_manager: SqlitePoolManager,
}

impl LikedResponseRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS liked_responses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                question TEXT NOT NULL,
                response TEXT NOT NULL,
                liked INTEGER NOT NULL DEFAULT 1,
                usage_count INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_liked_user_question
             ON liked_responses(user_id, question)",
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Returns the best liked record for the exact user + question pair:
    /// highest usage count, then most recent creation time. The final `id`
    /// tiebreak disambiguates rows created within the same timestamp.
    /// Question matching is exact (case- and whitespace-sensitive).
    pub async fn find_response(
        &self,
        user_id: i64,
        question: &str,
    ) -> Result<Option<LikedResponseRecord>, StorageError> {
        let record = sqlx::query_as::<_, LikedResponseRecord>(
            r#"
            SELECT * FROM liked_responses
            WHERE user_id = ? AND question = ? AND liked = 1
            ORDER BY usage_count DESC, created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(question)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(record)
    }

    /// Inserts a new liked row with usage count 1. Never deduplicates:
    /// each like event is its own row.
    pub async fn record(
        &self,
        user_id: i64,
        question: &str,
        response: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO liked_responses (user_id, question, response, liked, usage_count, created_at)
            VALUES (?, ?, ?, 1, 1, ?)
            "#,
        )
        .bind(user_id)
        .bind(question)
        .bind(response)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!(user_id, "Recorded liked response");
        Ok(())
    }

    /// Bumps the usage counter of a record that was served again.
    pub async fn increment_usage(&self, record_id: i64) -> Result<(), StorageError> {
        sqlx::query("UPDATE liked_responses SET usage_count = usage_count + 1 WHERE id = ?")
            .bind(record_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }
}
