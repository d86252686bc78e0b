//! Inbound feedback callback type (button tap on an earlier bot message).

use super::{chat::Chat, user::User};

/// A feedback callback event: who tapped which button on which message.
#[derive(Debug, Clone)]
pub struct FeedbackEvent {
    pub user: User,
    pub chat: Chat,
    /// Transport id of the bot message the button was attached to.
    pub message_id: String,
    /// Opaque payload of the tapped button.
    pub payload: String,
}
