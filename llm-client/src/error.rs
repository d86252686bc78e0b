//! Remote model error taxonomy and best-effort classification.

use thiserror::Error;

/// Classified failures from the remote model collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("model is not configured")]
    Unavailable,

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("blocked by safety filters: {0}")]
    SafetyBlocked(String),

    #[error("invalid credentials: {0}")]
    AuthInvalid(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("model call timed out")]
    Timeout,

    #[error("unknown model error: {0}")]
    Unknown(String),
}

/// Classifies a free-text failure description into an [`LlmError`] category.
///
/// Substring matching is best-effort; descriptions that match nothing fall
/// to [`LlmError::Unknown`]. Kept in one place so it can be swapped for
/// structured error codes if the API ever exposes them.
pub fn classify(description: &str) -> LlmError {
    let lower = description.to_lowercase();

    if lower.contains("quota")
        || lower.contains("resource_exhausted")
        || lower.contains("rate limit")
        || lower.contains("billing")
    {
        return LlmError::QuotaExceeded(description.to_string());
    }
    if lower.contains("safety") || lower.contains("blocked") {
        return LlmError::SafetyBlocked(description.to_string());
    }
    if lower.contains("api key")
        || lower.contains("api_key")
        || lower.contains("unauthorized")
        || lower.contains("unauthenticated")
        || lower.contains("permission")
        || lower.contains("credential")
    {
        return LlmError::AuthInvalid(description.to_string());
    }
    if lower.contains("timeout") || lower.contains("timed out") {
        return LlmError::Timeout;
    }
    if lower.contains("network") || lower.contains("connect") || lower.contains("dns") {
        return LlmError::Network(description.to_string());
    }

    LlmError::Unknown(description.to_string())
}
