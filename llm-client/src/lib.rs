//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and a Gemini implementation.
//! Transport-agnostic; the bot's response resolver consumes the trait and
//! tests substitute scripted implementations.

mod error;
mod gemini;

pub use error::{classify, LlmError};
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Role of a prompt turn, one-to-one with the Gemini API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// A turn authored by the end user (API `role: "user"`).
    User,
    /// A turn authored by the model (API `role: "model"`).
    Model,
}

impl TurnRole {
    /// Wire value for the `contents[].role` field.
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

/// A single prompt turn submitted to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTurn {
    pub role: TurnRole,
    pub text: String,
}

impl PromptTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// LLM client interface: request a completion from an ordered list of turns.
/// The last turn is the current question.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, turns: &[PromptTurn]) -> Result<String, LlmError>;
}
