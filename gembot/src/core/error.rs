//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error used by handlers, the transport
//! adapter, and the runner. Remote-model failures never appear here: the
//! resolver absorbs them and turns them into user-facing text.

use thiserror::Error;

/// Top-level error for gembot (storage, transport, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
