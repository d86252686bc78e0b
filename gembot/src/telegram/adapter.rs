//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code
//! sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId,
};

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, Result};
use crate::feedback::{CALLBACK_DISLIKE, CALLBACK_LIKE};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Like/dislike inline keyboard attached to fresh AI replies.
fn feedback_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("👍", CALLBACK_LIKE),
        InlineKeyboardButton::callback("👎", CALLBACK_DISLIKE),
    ]])
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_with_feedback_buttons(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(feedback_keyboard())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        match self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
        {
            Ok(_) => Ok(()),
            // Re-tapping a button can produce an identical edit; Telegram
            // rejects those and nothing needs to change.
            Err(e) if e.to_string().contains("message is not modified") => Ok(()),
            Err(e) => Err(BotError::Transport(e.to_string())),
        }
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
