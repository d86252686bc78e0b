//! Builds the bot's shared components (repositories, caches, resolver,
//! tracker) and the handler chain from config.

use std::sync::Arc;
use std::time::Duration;

use llm_client::{GeminiClient, LlmClient};
use storage::{LikedResponseRepository, SessionRepository, SqlitePoolManager, UserRepository};
use tracing::info;

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{Bot, Result};
use crate::feedback::FeedbackTracker;
use crate::handlers::{ChatHandler, StartCommandHandler, UserUpsertHandler};
use crate::resolver::ResponseResolver;
use crate::session::SessionCache;

/// Shared components wired from config. Tests build these by hand to
/// inject mock transports and scripted models.
#[derive(Clone)]
pub struct BotComponents {
    pub users: UserRepository,
    pub sessions: Arc<SessionCache>,
    pub liked: LikedResponseRepository,
    pub resolver: Arc<ResponseResolver>,
    pub tracker: Arc<FeedbackTracker>,
    pub bot: Arc<dyn Bot>,
}

/// Creates repositories, session cache, resolver, and tracker. When no
/// Gemini key is configured the resolver runs without a model and serves
/// the fixed unavailable message.
pub async fn build_bot_components(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<BotComponents> {
    let pool_manager = SqlitePoolManager::new(&config.database_url)
        .await
        .map_err(storage::StorageError::from)?;

    let users = UserRepository::new(pool_manager.clone()).await?;
    let session_repo = SessionRepository::new(pool_manager.clone()).await?;
    let liked = LikedResponseRepository::new(pool_manager).await?;

    let sessions = Arc::new(SessionCache::new(session_repo));

    let llm: Option<Arc<dyn LlmClient>> = config.gemini_api_key.clone().map(|key| {
        let client = match &config.gemini_api_url {
            Some(base_url) => GeminiClient::with_base_url(
                key,
                config.gemini_model.clone(),
                base_url.clone(),
            ),
            None => GeminiClient::new(key, config.gemini_model.clone()),
        };
        Arc::new(client) as Arc<dyn LlmClient>
    });

    if llm.is_none() {
        info!("GEMINI_API_KEY not set; running without a model");
    }

    let resolver = Arc::new(ResponseResolver::new(
        sessions.clone(),
        liked.clone(),
        llm,
        Duration::from_secs(config.request_timeout_secs),
        config.max_concurrent_requests,
    ));

    Ok(BotComponents {
        users,
        sessions,
        liked,
        resolver,
        tracker: Arc::new(FeedbackTracker::new()),
        bot,
    })
}

/// Builds the message handler chain: upsert → /start → chat.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(UserUpsertHandler::new(components.users.clone())))
        .add_handler(Arc::new(StartCommandHandler::new(
            components.sessions.clone(),
        )))
        .add_handler(Arc::new(ChatHandler::new(
            components.resolver.clone(),
            components.bot.clone(),
        )))
}
