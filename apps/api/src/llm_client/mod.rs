/// LLM Client: the single point of entry for remote text generation.
///
/// Talks to the OpenRouter chat-completions endpoint with a fixed small
/// instruction-tuned model. One attempt per call, bounded by `REQUEST_TIMEOUT`.
/// Callers always have a deterministic fallback, so failures are returned as
/// typed errors rather than retried.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// The model used for every drafting call.
pub const MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 150;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const REFERER: &str = "http://localhost:8080";
const TITLE: &str = "Feedback System";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(e)
        }
    }
}

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter client. Without an API key every call fails fast with
/// `LlmError::MissingCredential` and never touches the network.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_options(api_key, OPENROUTER_API_URL, REQUEST_TIMEOUT)
    }

    /// Client for any OpenRouter-compatible chat-completions `endpoint`.
    pub fn with_options(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint: endpoint.into(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends a single user prompt and returns the trimmed completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = extract_content(&body)?;
        debug!("LLM call succeeded: {} chars", text.len());
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt).await
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions body.
/// A top-level `error` key counts as failure even on 200, whatever its value.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LlmError::Malformed(e.to_string()))?;

    if let Some(error) = value.get("error") {
        return Err(LlmError::Api {
            status: 200,
            message: error.to_string(),
        });
    }

    let parsed: ChatResponse =
        serde_json::from_value(value).map_err(|e| LlmError::Malformed(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Malformed("no choices in response".to_string()))?
        .message
        .content
        .ok_or_else(|| LlmError::Malformed("choice has no content".to_string()))?;

    let content = content.trim();
    if content.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(content.to_string())
}
