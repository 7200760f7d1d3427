//! HTTP client for the NewsAPI `everything` endpoint.
//!
//! Wraps `reqwest` with typed response deserialization, API-key handling,
//! and transport-level retry with exponential back-off on transient
//! failures (timeouts, 429, 5xx). A non-`ok` status in the JSON envelope
//! is surfaced as [`NewsApiError::Api`].

mod client;
mod error;
mod retry;
mod types;

pub use client::{EverythingParams, NewsApiClient};
pub use error::NewsApiError;
pub use types::Article;
