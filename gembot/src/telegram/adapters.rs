//! Conversions from teloxide types to core types.

use crate::core::{Chat, FeedbackEvent, Message, ToCoreMessage, ToCoreUser, User};

/// Converts a teloxide chat to the core [`Chat`].
pub fn to_core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        is_private: chat.is_private(),
    }
}

/// Converts a teloxide user to the core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Converts a teloxide message to the core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: to_core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
        }
    }
}

/// Converts a callback query into a core [`FeedbackEvent`]. Returns `None`
/// when the originating message is inaccessible or the query has no payload.
pub fn to_feedback_event(query: &teloxide::types::CallbackQuery) -> Option<FeedbackEvent> {
    let message = query.message.as_ref()?;
    let payload = query.data.clone()?;

    Some(FeedbackEvent {
        user: TelegramUserWrapper(&query.from).to_core(),
        chat: to_core_chat(message.chat()),
        message_id: message.id().to_string(),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    #[test]
    fn test_telegram_user_wrapper_minimal() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(456),
            is_bot: false,
            first_name: "Minimal".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 456);
        assert_eq!(core_user.username, None);
        assert_eq!(core_user.first_name, Some("Minimal".to_string()));
        assert_eq!(core_user.last_name, None);
    }
}
