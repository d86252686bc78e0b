//! Chat type for core messages.

use serde::{Deserialize, Serialize};

/// The chat a message arrived in. `is_private` marks a direct chat with
/// the bot, which doubles as the user's private chat address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub is_private: bool,
}
