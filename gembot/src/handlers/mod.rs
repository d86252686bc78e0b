//! Chain handlers: user upsert, /start command, and AI chat.

mod chat_handler;
mod start_handler;
mod upsert_handler;

pub use chat_handler::ChatHandler;
pub use start_handler::{StartCommandHandler, GREETING};
pub use upsert_handler::UserUpsertHandler;
