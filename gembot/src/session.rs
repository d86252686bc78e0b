//! # Session cache
//!
//! Process-local view of each user's rolling conversation, lazily hydrated
//! from the session repository and written through on every mutation. The
//! in-memory copy is the source of truth for the current process: a failing
//! store degrades persistence, never chat behavior.

use std::collections::HashMap;
use std::sync::Arc;

use storage::{SessionMessage, SessionRepository};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Maximum number of messages retained per user session. Enforced before
/// every persist; the oldest entries are dropped first.
pub const SESSION_CAP: usize = 20;

#[derive(Default)]
struct SessionState {
    messages: Vec<SessionMessage>,
    hydrated: bool,
}

/// In-memory cache of rolling sessions, one entry per user.
///
/// Entries hydrate lazily on first access and are never proactively
/// expired; the per-user mutex serializes all mutations for that user.
pub struct SessionCache {
    repo: SessionRepository,
    sessions: RwLock<HashMap<i64, Arc<Mutex<SessionState>>>>,
}

impl SessionCache {
    pub fn new(repo: SessionRepository) -> Self {
        Self {
            repo,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn entry(&self, user_id: i64) -> Arc<Mutex<SessionState>> {
        if let Some(entry) = self.sessions.read().await.get(&user_id) {
            return entry.clone();
        }
        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }

    async fn hydrate(&self, user_id: i64, state: &mut SessionState) {
        if state.hydrated {
            return;
        }
        match self.repo.load_latest(user_id).await {
            Ok(messages) => {
                debug!(user_id, count = messages.len(), "Hydrated session from store");
                state.messages = messages;
            }
            Err(e) => {
                warn!(user_id, error = %e, "Failed to load stored session, starting empty");
            }
        }
        state.hydrated = true;
    }

    /// Returns the user's current rolling history, oldest first.
    pub async fn get(&self, user_id: i64) -> Vec<SessionMessage> {
        let entry = self.entry(user_id).await;
        let mut state = entry.lock().await;
        self.hydrate(user_id, &mut state).await;
        state.messages.clone()
    }

    /// Appends a message, evicting from the front once the cap is exceeded.
    /// Callers persist explicitly after a batch of appends.
    pub async fn append(&self, user_id: i64, message: SessionMessage) {
        let entry = self.entry(user_id).await;
        let mut state = entry.lock().await;
        self.hydrate(user_id, &mut state).await;

        state.messages.push(message);
        if state.messages.len() > SESSION_CAP {
            let excess = state.messages.len() - SESSION_CAP;
            state.messages.drain(..excess);
        }
    }

    /// Writes the in-memory state through to the repository. A write
    /// failure is logged and swallowed; the in-memory copy stays
    /// authoritative for the rest of the process lifetime.
    pub async fn persist(&self, user_id: i64) {
        let entry = self.entry(user_id).await;
        let mut state = entry.lock().await;
        self.hydrate(user_id, &mut state).await;

        if let Err(e) = self.repo.save(user_id, &state.messages).await {
            warn!(user_id, error = %e, "Failed to persist session");
        }
    }

    /// Empties the session and removes the backing record.
    pub async fn clear(&self, user_id: i64) {
        let entry = self.entry(user_id).await;
        let mut state = entry.lock().await;

        state.messages.clear();
        // The cleared state is authoritative; never hydrate over it.
        state.hydrated = true;

        if let Err(e) = self.repo.delete(user_id).await {
            warn!(user_id, error = %e, "Failed to delete stored session");
        }
    }
}
