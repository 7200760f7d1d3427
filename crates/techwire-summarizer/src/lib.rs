//! Tech-news summarization with graceful degradation.
//!
//! [`Summarizer::summarize`] compresses article text into 2–3 sentences via
//! a language-model completion API. Providers are tried in order (current
//! chat shape, then the legacy prompt shape); any failure is logged and the
//! next strategy runs. When no provider is configured or all attempts fail,
//! the text is truncated locally instead. The function never errors and the
//! value is always usable as a stored summary.

mod error;
pub mod provider;

use std::time::Duration;

pub use error::SummarizerError;
pub use provider::{ChatCompletionsProvider, CompletionProvider, LegacyCompletionsProvider};

/// Returned for empty or whitespace-only input.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Character budget for the local truncation fallback.
const TRUNCATE_AT_CHARS: usize = 400;

/// Configuration for [`Summarizer::new`].
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Completion API key; `None` disables remote summarization entirely.
    pub api_key: Option<String>,
    /// Completion API base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model identifier, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Summarizes text through an ordered provider chain with a local fallback.
///
/// Holds no mutable state; one instance is constructed at process start and
/// shared across the pipeline and any other callers (the post-creation flow
/// uses the same seam).
pub struct Summarizer {
    providers: Vec<Box<dyn CompletionProvider>>,
}

impl Summarizer {
    /// Build a summarizer from config.
    ///
    /// With an API key, the chain is chat completions then legacy
    /// completions, sharing one `reqwest::Client`. Without a key the chain
    /// is empty and every call falls through to truncation. A client
    /// construction failure also degrades to the empty chain; summarization
    /// is best-effort and must not fail startup.
    #[must_use]
    pub fn new(config: &SummarizerConfig) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            tracing::info!("no completion API key configured; summaries fall back to truncation");
            return Self { providers: vec![] };
        };

        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "completion HTTP client construction failed; summaries fall back to truncation");
                return Self { providers: vec![] };
            }
        };

        let providers: Vec<Box<dyn CompletionProvider>> = vec![
            Box::new(ChatCompletionsProvider::new(
                client.clone(),
                api_key,
                &config.base_url,
                &config.model,
            )),
            Box::new(LegacyCompletionsProvider::new(
                client,
                api_key,
                &config.base_url,
                &config.model,
            )),
        ];

        Self { providers }
    }

    /// Build a summarizer from an explicit provider chain (used in tests and
    /// by callers with custom strategies).
    #[must_use]
    pub fn with_providers(providers: Vec<Box<dyn CompletionProvider>>) -> Self {
        Self { providers }
    }

    /// Produce a short summary of `text`.
    ///
    /// Empty input yields [`NO_DESCRIPTION_PLACEHOLDER`]. Providers are
    /// tried in order and the first non-empty completion wins; every failure
    /// is logged as a warning. If the chain is empty or exhausted, returns
    /// [`truncate_summary`] of the input.
    pub async fn summarize(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return NO_DESCRIPTION_PLACEHOLDER.to_owned();
        }

        let prompt = format!(
            "Summarize this computer/tech news item in 2-3 punchy sentences. \
             Be clear, engaging, and avoid hypey buzzwords:\n\n{text}"
        );

        for provider in &self.providers {
            match provider.complete(&prompt).await {
                Ok(summary) => return summary,
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "completion attempt failed");
                }
            }
        }

        truncate_summary(text)
    }
}

/// Deterministic local fallback: the input unchanged when it fits the
/// character budget, otherwise the leading characters plus an ellipsis.
///
/// Operates on `char` boundaries, so multibyte text never splits mid-glyph.
#[must_use]
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= TRUNCATE_AT_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(TRUNCATE_AT_CHARS).collect();
    out.push('…');
    out
}
