//! Offline unit tests for techwire-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use techwire_core::{AppConfig, Environment};
use techwire_db::{PoolConfig, TrendingStoryRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        news_api_key: None,
        news_base_url: "https://newsapi.org/v2".to_string(),
        openai_api_key: None,
        openai_base_url: "https://api.openai.com/v1".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        http_timeout_secs: 15,
        http_max_retries: 3,
        http_retry_backoff_base_ms: 500,
        user_agent: "ua".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`TrendingStoryRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn trending_story_row_has_expected_fields() {
    use chrono::Utc;

    let row = TrendingStoryRow {
        id: 1_i64,
        title: "Rust 2.0 announced".to_string(),
        summary: "The Rust project announced a new edition.".to_string(),
        image_url: None,
        source_url: "https://arstechnica.com/rust-2".to_string(),
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.title, "Rust 2.0 announced");
    assert!(row.image_url.is_none());
    assert_eq!(row.source_url, "https://arstechnica.com/rust-2");
}
