//! # Gemini Telegram chat bot
//!
//! Relays chat questions to Gemini with bounded rolling history, caches
//! liked answers for reuse, and reconciles like/dislike feedback against
//! in-flight responses. Core pieces: [`session::SessionCache`],
//! [`resolver::ResponseResolver`], [`feedback::FeedbackTracker`]; the
//! `telegram` module adapts everything to teloxide.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod feedback;
pub mod handlers;
pub mod resolver;
pub mod runner;
pub mod session;
pub mod telegram;

pub use chain::HandlerChain;
pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use core::{
    init_tracing, parse_message_id, Bot, BotError, Chat, FeedbackEvent, FeedbackOffer, Handler,
    HandlerResponse, Message, OutgoingReply, Result, ToCoreMessage, ToCoreUser, User,
};
pub use feedback::{
    FeedbackFlow, FeedbackOutcome, FeedbackTracker, PendingFeedback, CALLBACK_DISLIKE,
    CALLBACK_LIKE,
};
pub use resolver::{Resolution, ResponseResolver};
pub use runner::{run_bot, TelegramBot};
pub use session::{SessionCache, SESSION_CAP};
pub use telegram::{TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
