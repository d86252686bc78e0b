//! User profile model for persistence.
//!
//! Maps to the `users` table; upserted on every inbound event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Chat id of the user's private chat with the bot, when known.
    pub private_chat_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a profile with the current timestamp. On upsert the stored
    /// `created_at` of an existing row is preserved.
    pub fn new(
        id: i64,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        private_chat_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            private_chat_id,
            created_at: Utc::now(),
        }
    }
}
