//! Handler that resolves a user question into an AI reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::core::{Bot, Handler, HandlerResponse, Message, OutgoingReply, Result};
use crate::resolver::{Resolution, ResponseResolver};

/// Terminal handler of the chain: every remaining text message is treated
/// as a question for the resolver. Fresh AI replies carry a feedback offer
/// so the runner attaches buttons and registers the pending pair.
pub struct ChatHandler {
    resolver: Arc<ResponseResolver>,
    bot: Arc<dyn Bot>,
}

impl ChatHandler {
    pub fn new(resolver: Arc<ResponseResolver>, bot: Arc<dyn Bot>) -> Self {
        Self { resolver, bot }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let question = message.content.trim();
        if question.is_empty() {
            return Ok(HandlerResponse::Stop);
        }

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(user_id = message.user.id, error = %e, "Failed to send typing indicator");
        }

        let resolution = self.resolver.resolve(message.user.id, question).await;

        let reply = match resolution {
            Resolution::Generated(text) => {
                OutgoingReply::with_feedback(text.clone(), question, text)
            }
            other => OutgoingReply::plain(other.user_text()),
        };

        Ok(HandlerResponse::Reply(reply))
    }
}
