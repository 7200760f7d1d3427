use thiserror::Error;

/// Errors returned by a completion provider attempt.
///
/// These never escape [`crate::Summarizer::summarize`]: a failed provider
/// is logged and the next strategy (or local truncation) takes over.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// non-2xx statuses surfaced via `error_for_status`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion response parsed but contained no usable text.
    #[error("completion response contained no text")]
    EmptyCompletion,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
