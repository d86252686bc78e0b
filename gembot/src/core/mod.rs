//! Core abstractions: types, errors, logging, and the transport seam.

mod bot;
mod error;
mod logger;
mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, FeedbackEvent, FeedbackOffer, Handler, HandlerResponse, Message, OutgoingReply,
    ToCoreMessage, ToCoreUser, User,
};
