//! Session repository: wholesale persistence of per-user rolling sessions.
//!
//! Each user has at most one live row; `save` replaces the stored message
//! list in full, so the in-memory session cache stays the source of truth.

use crate::error::StorageError;
use crate::models::SessionMessage;
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::debug;

#[derive(Clone)]
pub struct SessionRepository {
    pool_manager: SqlitePoolManager,
}

impl SessionRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                user_id INTEGER PRIMARY KEY,
                messages TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Returns the stored session for the user, oldest message first;
    /// empty when no row exists.
    pub async fn load_latest(&self, user_id: i64) -> Result<Vec<SessionMessage>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT messages FROM sessions WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        match row {
            Some((json,)) => {
                let messages: Vec<SessionMessage> = serde_json::from_str(&json)?;
                debug!(user_id, count = messages.len(), "Loaded stored session");
                Ok(messages)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the stored session wholesale.
    pub async fn save(&self, user_id: i64, messages: &[SessionMessage]) -> Result<(), StorageError> {
        let json = serde_json::to_string(messages)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, messages, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                messages = excluded.messages,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(&json)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        debug!(user_id, count = messages.len(), "Saved session");
        Ok(())
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        debug!(user_id, "Deleted stored session");
        Ok(())
    }
}
