//! Liked response model for persistence.
//!
//! Maps to the `liked_responses` table. Rows are insert-only; only the
//! usage counter changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LikedResponseRecord {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub response: String,
    pub liked: bool,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}
