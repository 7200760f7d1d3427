//! Typed client for the NewsAPI `everything` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::retry::retry_with_backoff;
use crate::types::{Article, EverythingResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// Query parameters for the `everything` endpoint.
#[derive(Debug, Clone)]
pub struct EverythingParams<'a> {
    /// Keyword query, e.g. `"AI OR programming OR cybersecurity"`.
    pub query: &'a str,
    /// ISO language code, e.g. `"en"`.
    pub language: &'a str,
    /// Sort order, e.g. `"publishedAt"` for newest first.
    pub sort_by: &'a str,
    /// Result cap per request (NewsAPI allows up to 100).
    pub page_size: u32,
    /// Comma-separated publisher domain allow-list.
    pub domains: &'a str,
}

/// Client for the NewsAPI REST API.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`NewsApiClient::new`] for production or [`NewsApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, NewsApiError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsApiError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent.to_owned())
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the endpoint as a path segment rather than replacing
        // the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| NewsApiError::Api {
            code: "invalidBaseUrl".to_owned(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches articles from the `everything` endpoint, newest first.
    ///
    /// Transient failures (timeouts, 429, 5xx) are retried with exponential
    /// back-off up to the configured retry count before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::Api`] if the API reports `"status": "error"`.
    /// - [`NewsApiError::Http`] on network failure or non-2xx HTTP status
    ///   after retries are exhausted.
    /// - [`NewsApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn everything(
        &self,
        params: &EverythingParams<'_>,
    ) -> Result<Vec<Article>, NewsApiError> {
        let url = self.build_url(params)?;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(&url)
        })
        .await?;

        let envelope: EverythingResponse =
            serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
                context: "everything".to_owned(),
                source: e,
            })?;

        if envelope.status != "ok" {
            return Err(NewsApiError::Api {
                code: envelope.code.unwrap_or_else(|| "unknown".to_owned()),
                message: envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_owned()),
            });
        }

        Ok(envelope.articles)
    }

    /// Builds the full request URL with properly percent-encoded query parameters.
    fn build_url(&self, params: &EverythingParams<'_>) -> Result<Url, NewsApiError> {
        let mut url = self
            .base_url
            .join("everything")
            .map_err(|e| NewsApiError::Api {
                code: "invalidBaseUrl".to_owned(),
                message: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", params.query);
            pairs.append_pair("language", params.language);
            pairs.append_pair("sortBy", params.sort_by);
            pairs.append_pair("pageSize", &params.page_size.to_string());
            pairs.append_pair("domains", params.domains);
            pairs.append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] on network failure or a non-2xx status.
    /// Returns [`NewsApiError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NewsApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NewsApiError::Deserialize {
            context: "everything".to_owned(),
            source: e,
        })
    }
}
