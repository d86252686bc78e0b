//! Bot abstraction for outbound transport actions.
//!
//! [`Bot`] is transport-agnostic; the teloxide adapter implements it in
//! production and tests substitute a recording mock.

use async_trait::async_trait;

use crate::core::error::{BotError, Result};
use crate::core::types::Chat;

/// Abstraction for sending and editing messages. Implementations map to a
/// transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a message carrying like/dislike buttons and returns its
    /// transport message id (used as the pending-feedback key).
    async fn send_with_feedback_buttons(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Edits an already-sent message; editing also drops any attached keyboard.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;

    /// Shows a typing indicator while a response is being prepared.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a transport message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Transport(format!("Invalid message_id for edit: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }
}
