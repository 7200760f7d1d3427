//! Integration tests for the provider chain using wiremock HTTP mocks.

use techwire_summarizer::{Summarizer, SummarizerConfig, NO_DESCRIPTION_PLACEHOLDER};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_summarizer(base_url: &str) -> Summarizer {
    Summarizer::new(&SummarizerConfig {
        api_key: Some("test-key".to_owned()),
        base_url: base_url.to_owned(),
        model: "gpt-4o-mini".to_owned(),
        timeout_secs: 5,
    })
}

const LONG_INPUT_LEN: usize = 450;

fn long_input() -> String {
    "x".repeat(LONG_INPUT_LEN)
}

#[tokio::test]
async fn chat_provider_wins_when_it_succeeds() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": "A crisp two-sentence summary." } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 120,
            "temperature": 0.6
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    // The legacy endpoint must never be hit when chat succeeds.
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summarizer = test_summarizer(&server.uri());
    let summary = summarizer.summarize("Some article text about Kubernetes.").await;

    assert_eq!(summary, "A crisp two-sentence summary.");
}

#[tokio::test]
async fn legacy_provider_is_tried_when_chat_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "choices": [ { "text": "  Legacy summary text. " } ]
    });
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = test_summarizer(&server.uri());
    let summary = summarizer.summarize("Some article text about GPUs.").await;

    assert_eq!(summary, "Legacy summary text.");
}

#[tokio::test]
async fn all_providers_failing_falls_back_to_truncation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = test_summarizer(&server.uri());
    let input = long_input();
    let summary = summarizer.summarize(&input).await;

    assert_eq!(summary.chars().count(), 401);
    assert!(summary.ends_with('…'));
}

#[tokio::test]
async fn blank_completion_moves_to_next_provider() {
    let server = MockServer::start().await;

    let empty = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": "   " } } ]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&empty))
        .expect(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({ "choices": [ { "text": "Usable summary." } ] });
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = test_summarizer(&server.uri());
    let summary = summarizer.summarize("Article text.").await;

    assert_eq!(summary, "Usable summary.");
}

#[tokio::test]
async fn missing_api_key_skips_remote_calls_entirely() {
    let summarizer = Summarizer::new(&SummarizerConfig {
        api_key: None,
        base_url: "https://api.openai.com/v1".to_owned(),
        model: "gpt-4o-mini".to_owned(),
        timeout_secs: 5,
    });

    let short = "Under the limit.";
    assert_eq!(summarizer.summarize(short).await, short);
    assert_eq!(summarizer.summarize("").await, NO_DESCRIPTION_PLACEHOLDER);

    let long = long_input();
    let out = summarizer.summarize(&long).await;
    assert_eq!(out.chars().count(), 401);
    assert!(out.ends_with('…'));
}
