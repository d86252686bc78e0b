//! Application facade and entry point: wires components, the handler
//! chain, and the feedback flow, and starts the teloxide dispatcher.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::core::{
    init_tracing, Bot, FeedbackEvent, HandlerResponse, Message as CoreMessage, OutgoingReply,
    Result,
};
use crate::chain::HandlerChain;
use crate::feedback::{FeedbackFlow, FeedbackOutcome};
use crate::telegram::{run_dispatcher, TelegramBotAdapter};

/// TelegramBot: components, handler chain, and feedback flow. Drives one
/// inbound event at a time (callable from tests).
pub struct TelegramBot {
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
    pub feedback_flow: FeedbackFlow,
}

impl TelegramBot {
    /// Creates a TelegramBot from config and an outbound transport.
    pub async fn new(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<Self> {
        let components = build_bot_components(config, bot).await?;
        Ok(Self::from_components(components))
    }

    /// Creates a TelegramBot from pre-built components (e.g. tests with a
    /// mock transport and a scripted model).
    pub fn from_components(components: BotComponents) -> Self {
        let handler_chain = build_handler_chain(&components);
        let feedback_flow = FeedbackFlow::new(
            components.users.clone(),
            components.liked.clone(),
            components.resolver.clone(),
            components.tracker.clone(),
            components.bot.clone(),
        );
        Self {
            components,
            handler_chain,
            feedback_flow,
        }
    }

    /// Handles one inbound text message end to end: runs the chain, sends
    /// the reply, and registers pending feedback for fresh AI replies.
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    pub async fn handle_message(&self, message: &CoreMessage) -> Result<()> {
        if let HandlerResponse::Reply(reply) = self.handler_chain.handle(message).await? {
            self.deliver(message, reply).await?;
        }
        Ok(())
    }

    async fn deliver(&self, message: &CoreMessage, reply: OutgoingReply) -> Result<()> {
        match reply.feedback {
            Some(offer) => {
                let message_id = self
                    .components
                    .bot
                    .send_with_feedback_buttons(&message.chat, &reply.text)
                    .await?;
                self.components
                    .tracker
                    .register(message.user.id, message_id, offer.question, offer.response)
                    .await;
            }
            None => {
                self.components
                    .bot
                    .send_message(&message.chat, &reply.text)
                    .await?;
            }
        }
        Ok(())
    }

    /// Handles one feedback callback.
    pub async fn handle_feedback(&self, event: &FeedbackEvent) -> Result<FeedbackOutcome> {
        self.feedback_flow.handle(event).await
    }
}

/// Main entry: init logging, validate config, build components, start the
/// dispatcher. Runs until the process is stopped.
pub async fn run_bot(config: BotConfig) -> anyhow::Result<()> {
    config.validate()?;
    std::fs::create_dir_all("logs")?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        model = %config.gemini_model,
        model_configured = config.gemini_api_key.is_some(),
        "Initializing bot"
    );

    let teloxide_bot = teloxide::Bot::new(config.bot_token.clone());
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let app = Arc::new(TelegramBot::new(&config, adapter).await?);

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, app).await;

    Ok(())
}
