//! Handler for the /start command: clears the rolling session and greets.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, HandlerResponse, Message, OutgoingReply, Result};
use crate::session::SessionCache;

/// Greeting sent after /start.
pub const GREETING: &str = "👋 Hi! I'm an AI assistant powered by Gemini. I remember our recent \
conversation, so just talk to me like you would to a person.";

/// Handles /start: empties the user's rolling session (memory and store)
/// and replies with the greeting.
pub struct StartCommandHandler {
    sessions: Arc<SessionCache>,
}

impl StartCommandHandler {
    pub fn new(sessions: Arc<SessionCache>) -> Self {
        Self { sessions }
    }
}

/// Matches `/start` and the group form `/start@BotName`.
fn is_start_command(text: &str) -> bool {
    text == "/start" || text.starts_with("/start@")
}

#[async_trait]
impl Handler for StartCommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !is_start_command(message.content.trim()) {
            return Ok(HandlerResponse::Continue);
        }

        info!(user_id = message.user.id, "Clearing session on /start");
        self.sessions.clear(message.user.id).await;

        Ok(HandlerResponse::Reply(OutgoingReply::plain(GREETING)))
    }
}
