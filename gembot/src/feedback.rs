//! # Pending feedback
//!
//! [`FeedbackTracker`] is the ephemeral map from (user, outgoing message)
//! to the question/response pair awaiting a like/dislike decision.
//! [`FeedbackFlow`] routes an incoming callback to its effect: persisting
//! the liked pair, or regenerating the disliked answer.

use std::collections::HashMap;
use std::sync::Arc;

use storage::{LikedResponseRepository, UserProfile, UserRepository};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::core::{Bot, FeedbackEvent, Result};
use crate::resolver::{Resolution, ResponseResolver};

/// Callback payload sent by the like button.
pub const CALLBACK_LIKE: &str = "feedback_like";

/// Callback payload sent by the dislike button.
pub const CALLBACK_DISLIKE: &str = "feedback_dislike";

/// Notice sent when a callback arrives for a message that is no longer
/// (or never was) awaiting feedback.
pub const NOT_PENDING_MESSAGE: &str = "🤷 That reply is no longer awaiting feedback.";

/// Appended to a liked reply when the like is acknowledged in place.
const LIKED_ACK_SUFFIX: &str = "👍 Saved for reuse";

/// Key identifying one outgoing message awaiting feedback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FeedbackKey {
    user_id: i64,
    message_id: String,
}

/// Question/response pair recorded when an AI reply is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFeedback {
    pub question: String,
    pub response: String,
}

/// Tracks responses awaiting a like/dislike decision.
///
/// Entries live only in process memory: one is created per emitted AI
/// reply and removed the moment feedback arrives. Entries for messages
/// that never receive feedback are simply left behind.
#[derive(Default)]
pub struct FeedbackTracker {
    pending: Mutex<HashMap<FeedbackKey, PendingFeedback>>,
}

impl FeedbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an emitted response under (user, message id).
    pub async fn register(
        &self,
        user_id: i64,
        message_id: impl Into<String>,
        question: impl Into<String>,
        response: impl Into<String>,
    ) {
        let key = FeedbackKey {
            user_id,
            message_id: message_id.into(),
        };
        self.pending.lock().await.insert(
            key,
            PendingFeedback {
                question: question.into(),
                response: response.into(),
            },
        );
    }

    /// Atomically fetches and removes the pending pair for the key.
    /// Returns `None` when the key is unknown or already resolved, so a
    /// redelivered callback cannot be processed twice.
    pub async fn resolve(&self, user_id: i64, message_id: &str) -> Option<PendingFeedback> {
        self.pending.lock().await.remove(&FeedbackKey {
            user_id,
            message_id: message_id.to_string(),
        })
    }
}

/// What a feedback callback amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Liked pair recorded; the existing message was edited in place.
    Saved,
    /// Disliked; a regenerated reply went out as a new message.
    Regenerated,
    /// Disliked, but regeneration failed; the failure text was sent.
    RegenerationFailed,
    /// The message was not awaiting feedback; a notice was sent.
    NotFound,
    /// The payload was not a recognized feedback token.
    UnknownPayload,
}

/// Routes like/dislike callbacks against the tracker, the liked-response
/// store, and the resolver.
pub struct FeedbackFlow {
    users: UserRepository,
    liked: LikedResponseRepository,
    resolver: Arc<ResponseResolver>,
    tracker: Arc<FeedbackTracker>,
    bot: Arc<dyn Bot>,
}

impl FeedbackFlow {
    pub fn new(
        users: UserRepository,
        liked: LikedResponseRepository,
        resolver: Arc<ResponseResolver>,
        tracker: Arc<FeedbackTracker>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            users,
            liked,
            resolver,
            tracker,
            bot,
        }
    }

    /// Handles one feedback callback end to end.
    #[instrument(skip(self, event), fields(user_id = event.user.id, message_id = %event.message_id))]
    pub async fn handle(&self, event: &FeedbackEvent) -> Result<FeedbackOutcome> {
        self.upsert_user(event).await;

        let payload = event.payload.as_str();
        if payload != CALLBACK_LIKE && payload != CALLBACK_DISLIKE {
            warn!(payload = %payload, "Unknown feedback payload");
            return Ok(FeedbackOutcome::UnknownPayload);
        }

        let Some(pending) = self.tracker.resolve(event.user.id, &event.message_id).await else {
            info!("No pending feedback for message");
            self.bot.send_message(&event.chat, NOT_PENDING_MESSAGE).await?;
            return Ok(FeedbackOutcome::NotFound);
        };

        if payload == CALLBACK_LIKE {
            self.like(event, pending).await
        } else {
            self.dislike(event, pending).await
        }
    }

    async fn upsert_user(&self, event: &FeedbackEvent) {
        let private_chat_id = event.chat.is_private.then_some(event.chat.id);
        let profile = UserProfile::new(
            event.user.id,
            event.user.username.clone(),
            event.user.first_name.clone(),
            event.user.last_name.clone(),
            private_chat_id,
        );
        if let Err(e) = self.users.upsert(&profile).await {
            warn!(user_id = event.user.id, error = %e, "Failed to upsert user profile");
        }
    }

    async fn like(&self, event: &FeedbackEvent, pending: PendingFeedback) -> Result<FeedbackOutcome> {
        if let Err(e) = self
            .liked
            .record(event.user.id, &pending.question, &pending.response)
            .await
        {
            // The reply itself already reached the user; a failed write
            // only costs future reuse.
            warn!(user_id = event.user.id, error = %e, "Failed to record liked response");
        }

        let acked = format!("{}\n\n{}", pending.response, LIKED_ACK_SUFFIX);
        self.bot
            .edit_message(&event.chat, &event.message_id, &acked)
            .await?;

        info!(user_id = event.user.id, "Liked response recorded");
        Ok(FeedbackOutcome::Saved)
    }

    async fn dislike(
        &self,
        event: &FeedbackEvent,
        pending: PendingFeedback,
    ) -> Result<FeedbackOutcome> {
        // Drop the keyboard on the rejected reply; the regenerated answer
        // arrives as a new message with its own buttons under a new key.
        self.bot
            .edit_message(&event.chat, &event.message_id, &pending.response)
            .await?;

        match self
            .resolver
            .regenerate(event.user.id, &pending.question)
            .await
        {
            Resolution::Generated(text) => {
                let message_id = self
                    .bot
                    .send_with_feedback_buttons(&event.chat, &text)
                    .await?;
                self.tracker
                    .register(event.user.id, message_id, pending.question, text)
                    .await;
                info!(user_id = event.user.id, "Regenerated reply sent");
                Ok(FeedbackOutcome::Regenerated)
            }
            other => {
                self.bot
                    .send_message(&event.chat, &other.user_text())
                    .await?;
                Ok(FeedbackOutcome::RegenerationFailed)
            }
        }
    }
}
