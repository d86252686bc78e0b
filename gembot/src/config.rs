//! Bot config: Telegram connection, Gemini, database, logging. Loaded from env.

use anyhow::Result;
use std::env;

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// GEMINI_API_KEY; when unset the bot runs without a model and serves
    /// a fixed unavailable message.
    pub gemini_api_key: Option<String>,
    /// GEMINI_MODEL
    pub gemini_model: String,
    /// GEMINI_API_URL override (e.g. a proxy); default is the public endpoint.
    pub gemini_api_url: Option<String>,
    /// GEMINI_TIMEOUT_SECS, applied per remote call.
    pub request_timeout_secs: u64,
    /// MAX_CONCURRENT_REQUESTS bound on in-flight model calls across all users.
    pub max_concurrent_requests: usize,
    /// DATABASE_URL (SQLite).
    pub database_url: String,
    /// Log file path.
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token =
            token.unwrap_or_else(|| env::var("BOT_TOKEN").expect("BOT_TOKEN not set"));
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
        let gemini_api_url = env::var("GEMINI_API_URL").ok();
        let request_timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let max_concurrent_requests = env::var("MAX_CONCURRENT_REQUESTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:gembot.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/gembot.log".to_string());

        Ok(Self {
            bot_token,
            gemini_api_key,
            gemini_model,
            gemini_api_url,
            request_timeout_secs,
            max_concurrent_requests,
            database_url,
            log_file,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.gemini_api_url {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("GEMINI_API_URL is set but not a valid URL: {}", url);
            }
        }
        if self.max_concurrent_requests == 0 {
            anyhow::bail!("MAX_CONCURRENT_REQUESTS must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> BotConfig {
        BotConfig {
            bot_token: "token".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_api_url: None,
            request_timeout_secs: 30,
            max_concurrent_requests: 8,
            database_url: "sqlite::memory:".to_string(),
            log_file: "logs/test.log".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = base_config();
        config.gemini_api_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = base_config();
        config.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }
}
