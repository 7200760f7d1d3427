//! Completion provider strategies.
//!
//! Two wire shapes are supported: the current chat-completions endpoint and
//! the legacy prompt-completions endpoint. [`crate::Summarizer`] tries them
//! in order; the first success wins.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SummarizerError;

const MAX_TOKENS: u32 = 120;
const TEMPERATURE: f64 = 0.6;

/// One way of turning a prompt into completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider label used in degradation logs.
    fn name(&self) -> &'static str;

    /// Request a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError`] on network failure, non-2xx status, a
    /// malformed body, or an empty completion.
    async fn complete(&self, prompt: &str) -> Result<String, SummarizerError>;
}

// ---------------------------------------------------------------------------
// Chat completions (current API shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// POSTs to `{base}/chat/completions` with a single user message.
pub struct ChatCompletionsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatCompletionsProvider {
    #[must_use]
    pub fn new(client: Client, api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    fn name(&self) -> &'static str {
        "chat_completions"
    }

    async fn complete(&self, prompt: &str) -> Result<String, SummarizerError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| SummarizerError::Deserialize {
                context: "chat/completions".to_owned(),
                source: e,
            })?;

        extract_text(parsed.choices.into_iter().next().and_then(|c| c.message.content))
    }
}

// ---------------------------------------------------------------------------
// Legacy prompt completions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct LegacyCompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct LegacyCompletionResponse {
    choices: Vec<LegacyChoice>,
}

#[derive(Debug, Deserialize)]
struct LegacyChoice {
    text: Option<String>,
}

/// POSTs to `{base}/completions` using the older prompt-style shape.
/// Kept as a compatibility fallback behind [`ChatCompletionsProvider`].
pub struct LegacyCompletionsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LegacyCompletionsProvider {
    #[must_use]
    pub fn new(client: Client, api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }
}

#[async_trait]
impl CompletionProvider for LegacyCompletionsProvider {
    fn name(&self) -> &'static str {
        "legacy_completions"
    }

    async fn complete(&self, prompt: &str) -> Result<String, SummarizerError> {
        let request = LegacyCompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: LegacyCompletionResponse =
            serde_json::from_str(&body).map_err(|e| SummarizerError::Deserialize {
                context: "completions".to_owned(),
                source: e,
            })?;

        extract_text(parsed.choices.into_iter().next().and_then(|c| c.text))
    }
}

/// Trim the completion text; a missing or blank completion is an error so
/// the caller can move on to the next strategy.
fn extract_text(text: Option<String>) -> Result<String, SummarizerError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t.trim().to_owned()),
        _ => Err(SummarizerError::EmptyCompletion),
    }
}
