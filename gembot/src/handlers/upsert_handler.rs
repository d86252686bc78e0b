//! Handler that records the sender's profile on every inbound message.

use async_trait::async_trait;
use storage::{UserProfile, UserRepository};
use tracing::{instrument, warn};

use crate::core::{Handler, Message, Result};

/// Upserts the sending user before any other handler runs. A storage
/// failure is logged and never stops the chain.
pub struct UserUpsertHandler {
    users: UserRepository,
}

impl UserUpsertHandler {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler for UserUpsertHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let private_chat_id = message.chat.is_private.then_some(message.chat.id);
        let profile = UserProfile::new(
            message.user.id,
            message.user.username.clone(),
            message.user.first_name.clone(),
            message.user.last_name.clone(),
            private_chat_id,
        );

        if let Err(e) = self.users.upsert(&profile).await {
            warn!(user_id = message.user.id, error = %e, "Failed to upsert user profile");
        }

        Ok(true)
    }
}
