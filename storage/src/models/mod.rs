//! Record models for the storage crate.

mod liked_response;
mod session_message;
mod user_profile;

pub use liked_response::LikedResponseRecord;
pub use session_message::{MessageRole, SessionMessage};
pub use user_profile::UserProfile;
