mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use techwire_ingest::IngestRunner;
use techwire_newsapi::NewsApiClient;
use techwire_summarizer::{Summarizer, SummarizerConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(techwire_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = techwire_db::PoolConfig::from_app_config(&config);
    let pool = techwire_db::connect_pool(&config.database_url, pool_config).await?;
    techwire_db::run_migrations(&pool).await?;

    let runner = Arc::new(IngestRunner::new(
        pool.clone(),
        build_news_client(&config)?,
        Summarizer::new(&SummarizerConfig {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout_secs: config.http_timeout_secs,
        }),
    ));

    // Explicit startup run, requested by the entry point rather than hidden
    // in construction. Spawned so a slow first fetch cannot delay serving;
    // it shares the runner's gate with the scheduled job.
    {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move {
            tracing::info!("running startup ingest cycle");
            runner.run_if_idle().await;
        });
    }

    let _scheduler = scheduler::build_scheduler(Arc::clone(&runner)).await?;

    let app = build_app(AppState { pool }, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the NewsAPI client once at startup, or `None` when the key is
/// absent; the pipeline then logs and skips fetching each cycle.
fn build_news_client(
    config: &techwire_core::AppConfig,
) -> anyhow::Result<Option<NewsApiClient>> {
    let Some(api_key) = config.news_api_key.as_deref() else {
        return Ok(None);
    };

    let client = NewsApiClient::with_base_url(
        api_key,
        config.http_timeout_secs,
        &config.user_agent,
        config.http_max_retries,
        config.http_retry_backoff_base_ms,
        &config.news_base_url,
    )?;
    Ok(Some(client))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
