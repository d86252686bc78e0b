//! Gemini implementation of [`LlmClient`] over the REST `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{classify, LlmError};
use crate::{LlmClient, PromptTurn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against the public Gemini endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_BASE.to_string())
    }

    /// Creates a client with a custom API base URL (proxy or mock server in tests).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, turns))]
    async fn generate(&self, turns: &[PromptTurn]) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str(),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
        };

        debug!(model = %self.model, turns = turns.len(), "Submitting generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Unknown(format!("Invalid response body: {}", e)))?;

        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::SafetyBlocked(reason));
        }

        let text: String = body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::Unknown("Empty completion from model".to_string()));
        }

        debug!(chars = text.len(), "Received completion");
        Ok(text)
    }
}

/// Maps a reqwest transport failure to the error taxonomy.
fn request_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        return LlmError::Timeout;
    }
    if e.is_connect() {
        return LlmError::Network(e.to_string());
    }
    classify(&e.to_string())
}

/// Maps a non-success HTTP status (plus the error body) to the taxonomy.
fn status_error(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|e| {
            if e.status.is_empty() {
                e.message
            } else {
                format!("{}: {}", e.status, e.message)
            }
        })
        .unwrap_or_else(|| format!("HTTP {}", status));

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::QuotaExceeded(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthInvalid(message),
        _ => classify(&message),
    }
}
