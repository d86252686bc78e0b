//! # Response resolver
//!
//! Produces a response for (user, question): serves a previously liked
//! answer when one exists, otherwise builds a bounded prompt from the
//! rolling session and invokes the remote model. All remote and store
//! failures are absorbed here and rendered as user-facing text.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use llm_client::{LlmClient, LlmError, PromptTurn};
use storage::{LikedResponseRepository, MessageRole, SessionMessage};
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, instrument, warn};

use crate::session::SessionCache;

/// Number of trailing session messages included in the prompt.
pub const PROMPT_WINDOW: usize = 10;

/// Prefix marking replies served from the liked cache.
pub const LIKED_MARKER: &str = "⭐";

/// Fixed reply when no model is configured.
pub const UNAVAILABLE_MESSAGE: &str = "⚠️ The AI service is not configured. Please try again later.";

/// Outcome of resolving one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the liked cache; the text already carries the marker.
    Liked(String),
    /// Fresh reply from the remote model; eligible for feedback buttons.
    Generated(String),
    /// No model configured.
    Unavailable,
    /// Remote call failed with a classified error.
    Failed(LlmError),
}

impl Resolution {
    /// User-facing text for this outcome.
    pub fn user_text(&self) -> String {
        match self {
            Resolution::Liked(text) | Resolution::Generated(text) => text.clone(),
            Resolution::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
            Resolution::Failed(err) => failure_message(err),
        }
    }
}

/// Maps a classified remote failure to the text shown in chat.
pub fn failure_message(err: &LlmError) -> String {
    let cause = match err {
        LlmError::Unavailable => return UNAVAILABLE_MESSAGE.to_string(),
        LlmError::QuotaExceeded(_) => "the service quota has been exhausted; please try again later",
        LlmError::SafetyBlocked(_) => "the request was blocked by the safety filters; try rephrasing",
        LlmError::AuthInvalid(_) => "the service rejected the configured credentials",
        LlmError::Network(_) => "the service could not be reached; please try again",
        LlmError::Timeout => "the service took too long to respond; please try again",
        LlmError::Unknown(_) => "something went wrong while generating the reply",
    };
    format!("⚠️ AI error: {}.", cause)
}

/// Chooses between liked-cache reuse and remote generation, and keeps the
/// rolling session in sync with generated turns.
pub struct ResponseResolver {
    sessions: Arc<SessionCache>,
    liked: LikedResponseRepository,
    llm: Option<Arc<dyn LlmClient>>,
    timeout: Duration,
    limiter: Semaphore,
    gates: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl ResponseResolver {
    pub fn new(
        sessions: Arc<SessionCache>,
        liked: LikedResponseRepository,
        llm: Option<Arc<dyn LlmClient>>,
        timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            sessions,
            liked,
            llm,
            timeout,
            limiter: Semaphore::new(max_concurrent),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves (user, question): liked cache first, then remote generation.
    /// Liked hits do not touch the rolling session; liked answers are
    /// canonical facts, not conversation turns.
    #[instrument(skip(self, question))]
    pub async fn resolve(&self, user_id: i64, question: &str) -> Resolution {
        match self.liked.find_response(user_id, question).await {
            Ok(Some(record)) => {
                info!(
                    user_id,
                    record_id = record.id,
                    usage_count = record.usage_count,
                    "Serving liked response"
                );
                if let Err(e) = self.liked.increment_usage(record.id).await {
                    warn!(user_id, record_id = record.id, error = %e, "Failed to increment usage counter");
                }
                return Resolution::Liked(format!("{} {}", LIKED_MARKER, record.response));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(user_id, error = %e, "Liked-response lookup failed, falling back to generation");
            }
        }

        self.generate(user_id, question).await
    }

    /// Forces remote generation, skipping the liked cache. Used by the
    /// dislike flow so a previously liked answer cannot be reproduced.
    #[instrument(skip(self, question))]
    pub async fn regenerate(&self, user_id: i64, question: &str) -> Resolution {
        self.generate(user_id, question).await
    }

    async fn user_gate(&self, user_id: i64) -> Arc<Mutex<()>> {
        self.gates.lock().await.entry(user_id).or_default().clone()
    }

    async fn generate(&self, user_id: i64, question: &str) -> Resolution {
        let Some(llm) = self.llm.clone() else {
            return Resolution::Unavailable;
        };

        // One in-flight generation per user keeps the read-generate-append
        // sequence on the rolling session race-free.
        let gate = self.user_gate(user_id).await;
        let _guard = gate.lock().await;

        let history = self.sessions.get(user_id).await;
        let turns = build_prompt(&history, question);

        let _permit = self
            .limiter
            .acquire()
            .await
            .expect("limiter is never closed");

        let reply = match tokio::time::timeout(self.timeout, llm.generate(&turns)).await {
            Ok(Ok(text)) => text.trim().to_string(),
            Ok(Err(err)) => {
                warn!(user_id, error = %err, "Remote model call failed");
                return Resolution::Failed(err);
            }
            Err(_) => {
                warn!(
                    user_id,
                    timeout_secs = self.timeout.as_secs(),
                    "Remote model call timed out"
                );
                return Resolution::Failed(LlmError::Timeout);
            }
        };

        self.sessions
            .append(user_id, SessionMessage::user(question))
            .await;
        self.sessions
            .append(user_id, SessionMessage::assistant(reply.clone()))
            .await;
        self.sessions.persist(user_id).await;

        info!(user_id, reply_len = reply.len(), "Generated reply appended to session");
        Resolution::Generated(reply)
    }
}

/// Builds the bounded prompt: the trailing [`PROMPT_WINDOW`] session
/// messages (oldest first) mapped to the model's role vocabulary, plus the
/// question as the final user turn.
pub fn build_prompt(history: &[SessionMessage], question: &str) -> Vec<PromptTurn> {
    let start = history.len().saturating_sub(PROMPT_WINDOW);
    let mut turns: Vec<PromptTurn> = history[start..]
        .iter()
        .map(|message| match message.role {
            MessageRole::User => PromptTurn::user(message.content.clone()),
            MessageRole::Assistant => PromptTurn::model(message.content.clone()),
        })
        .collect();
    turns.push(PromptTurn::user(question));
    turns
}
