//! Telegram transport layer: teloxide adapter, type conversions, and the
//! dispatcher runner.

mod adapter;
mod adapters;
mod runner;

pub use adapter::TelegramBotAdapter;
pub use adapters::{to_core_chat, to_feedback_event, TelegramMessageWrapper, TelegramUserWrapper};
pub use runner::run_dispatcher;
