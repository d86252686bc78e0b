//! Storage crate: SQLite persistence for users, rolling sessions, and liked responses.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserProfile, SessionMessage, LikedResponseRecord
//! - [`user_repo`] – UserRepository (upsert-on-contact profiles)
//! - [`session_repo`] – SessionRepository (wholesale session snapshots)
//! - [`liked_repo`] – LikedResponseRepository (approved answers, usage counters)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod liked_repo;
mod models;
mod session_repo;
mod sqlite_pool;
mod user_repo;

pub use error::StorageError;
pub use liked_repo::LikedResponseRepository;
pub use models::{LikedResponseRecord, MessageRole, SessionMessage, UserProfile};
pub use session_repo::SessionRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
