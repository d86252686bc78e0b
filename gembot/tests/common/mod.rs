//! Shared test doubles: a recording transport and a scripted model.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gembot::core::{Bot, Chat, Result};
use llm_client::{LlmClient, LlmError, PromptTurn};

/// One outbound action captured by [`MockBot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentAction {
    Plain {
        chat_id: i64,
        text: String,
    },
    WithButtons {
        chat_id: i64,
        text: String,
        message_id: String,
    },
    Edited {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Typing {
        chat_id: i64,
    },
}

/// Recording transport: captures every outbound action and hands out
/// sequential message ids.
#[derive(Default)]
pub struct MockBot {
    actions: Mutex<Vec<SentAction>>,
    next_id: Mutex<i64>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<SentAction> {
        self.actions.lock().unwrap().clone()
    }

    /// Actions excluding typing indicators, which most assertions ignore.
    pub fn non_typing_actions(&self) -> Vec<SentAction> {
        self.actions()
            .into_iter()
            .filter(|a| !matches!(a, SentAction::Typing { .. }))
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.actions.lock().unwrap().push(SentAction::Plain {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_with_feedback_buttons(&self, chat: &Chat, text: &str) -> Result<String> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let message_id = next_id.to_string();

        self.actions.lock().unwrap().push(SentAction::WithButtons {
            chat_id: chat.id,
            text: text.to_string(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.actions.lock().unwrap().push(SentAction::Edited {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.actions
            .lock()
            .unwrap()
            .push(SentAction::Typing { chat_id: chat.id });
        Ok(())
    }
}

/// Scripted model: pops queued results and records every submitted prompt
/// as (wire role, text) pairs.
pub struct MockLlm {
    replies: Mutex<VecDeque<std::result::Result<String, LlmError>>>,
    calls: Mutex<Vec<Vec<(String, String)>>>,
}

impl MockLlm {
    pub fn with_replies(replies: Vec<std::result::Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<(String, String)>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate(&self, turns: &[PromptTurn]) -> std::result::Result<String, LlmError> {
        self.calls.lock().unwrap().push(
            turns
                .iter()
                .map(|t| (t.role.as_str().to_string(), t.text.clone()))
                .collect(),
        );
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Unknown("no scripted reply".to_string())))
    }
}

/// Core user/chat/message builders for tests.
pub fn test_user(id: i64) -> gembot::User {
    gembot::User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn test_chat(id: i64) -> Chat {
    Chat {
        id,
        is_private: true,
    }
}

pub fn test_message(user_id: i64, content: &str) -> gembot::Message {
    gembot::Message {
        id: "1".to_string(),
        user: test_user(user_id),
        chat: test_chat(user_id),
        content: content.to_string(),
    }
}

pub fn test_feedback_event(user_id: i64, message_id: &str, payload: &str) -> gembot::FeedbackEvent {
    gembot::FeedbackEvent {
        user: test_user(user_id),
        chat: test_chat(user_id),
        message_id: message_id.to_string(),
        payload: payload.to_string(),
    }
}
