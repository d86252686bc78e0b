//! User repository: upsert-on-contact persistence of user profiles.
//!
//! Uses SqlitePoolManager and the UserProfile model. Profiles are written
//! on every inbound event; display attributes follow last-write-wins.

use crate::error::StorageError;
use crate::models::UserProfile;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::debug;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                private_chat_id INTEGER,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Inserts or updates the profile. Display attributes are overwritten;
    /// `created_at` keeps its original value and the private chat id is
    /// only replaced when the new profile carries one (group events don't).
    pub async fn upsert(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, first_name, last_name, private_chat_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                private_chat_id = COALESCE(excluded.private_chat_id, users.private_chat_id)
            "#,
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.private_chat_id)
        .bind(profile.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        debug!(user_id = profile.id, "Upserted user profile");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserProfile>, StorageError> {
        let profile = sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(profile)
    }
}
