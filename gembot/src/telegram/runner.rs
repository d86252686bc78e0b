//! Dispatcher runner: converts teloxide updates to core events and hands
//! them to the application. Each update is processed in a spawned task so
//! one slow model call never delays other users.

use std::sync::Arc;

use teloxide::dptree;
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use super::adapters::{to_feedback_event, TelegramMessageWrapper};
use crate::core::ToCoreMessage;
use crate::runner::TelegramBot;

/// Starts long polling with handlers for text messages and feedback
/// callbacks. Returns when the dispatcher shuts down.
pub async fn run_dispatcher(bot: teloxide::Bot, app: Arc<TelegramBot>) {
    let message_app = app.clone();
    let message_handler = Update::filter_message().endpoint(
        move |msg: teloxide::types::Message| {
            let app = message_app.clone();
            async move {
                if msg.text().is_none() {
                    debug!(chat_id = msg.chat.id.0, "Ignoring non-text message");
                    return respond(());
                }

                let core_msg = TelegramMessageWrapper(&msg).to_core();
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "Received message"
                );

                tokio::spawn(async move {
                    if let Err(e) = app.handle_message(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Message handling failed");
                    }
                });

                respond(())
            }
        },
    );

    let callback_app = app.clone();
    let callback_handler = Update::filter_callback_query().endpoint(
        move |bot: Bot, query: teloxide::types::CallbackQuery| {
            let app = callback_app.clone();
            async move {
                // Answer right away so the button spinner stops; outcomes
                // are reported through message edits and sends.
                if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                    warn!(error = %e, "Failed to answer callback query");
                }

                let Some(event) = to_feedback_event(&query) else {
                    debug!("Ignoring callback without message or payload");
                    return respond(());
                };

                info!(
                    user_id = event.user.id,
                    message_id = %event.message_id,
                    payload = %event.payload,
                    "Received feedback callback"
                );

                tokio::spawn(async move {
                    if let Err(e) = app.handle_feedback(&event).await {
                        error!(error = %e, user_id = event.user.id, "Feedback handling failed");
                    }
                });

                respond(())
            }
        },
    );

    Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(message_handler)
            .branch(callback_handler),
    )
    .default_handler(|_| async {})
    .build()
    .dispatch()
    .await;
}
