//! Core domain types, decoupled from the transport.

mod callback;
mod chat;
mod handler;
mod message;
mod response;
mod user;

pub use callback::FeedbackEvent;
pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::Message;
pub use response::{FeedbackOffer, HandlerResponse, OutgoingReply};
pub use user::User;
