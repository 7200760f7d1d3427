use clap::{Parser, Subcommand};
use techwire_ingest::{IngestRunner, RETENTION_CAP};
use techwire_newsapi::NewsApiClient;
use techwire_summarizer::{Summarizer, SummarizerConfig};

#[derive(Debug, Parser)]
#[command(name = "techwire-cli")]
#[command(about = "Techwire trending-news command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one full ingest cycle now (fetch, summarize, persist, trim).
    Ingest,
    /// Trim stored stories down to the retention cap.
    Trim,
    /// Print the most recent stored stories.
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = techwire_core::load_app_config()?;

    let pool_config = techwire_db::PoolConfig::from_app_config(&config);
    let pool = techwire_db::connect_pool(&config.database_url, pool_config).await?;
    techwire_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Ingest => run_ingest(pool, &config).await,
        Commands::Trim => run_trim(&pool).await,
        Commands::Recent { limit } => run_recent(&pool, limit).await,
    }
}

async fn run_ingest(pool: sqlx::PgPool, config: &techwire_core::AppConfig) -> anyhow::Result<()> {
    let news = match config.news_api_key.as_deref() {
        Some(api_key) => Some(NewsApiClient::with_base_url(
            api_key,
            config.http_timeout_secs,
            &config.user_agent,
            config.http_max_retries,
            config.http_retry_backoff_base_ms,
            &config.news_base_url,
        )?),
        None => None,
    };

    let summarizer = Summarizer::new(&SummarizerConfig {
        api_key: config.openai_api_key.clone(),
        base_url: config.openai_base_url.clone(),
        model: config.openai_model.clone(),
        timeout_secs: config.http_timeout_secs,
    });

    let runner = IngestRunner::new(pool, news, summarizer);
    let report = runner.run().await;

    println!(
        "cycle complete: fetched {}, skipped {} existing, inserted {}, trimmed {}",
        report.fetched, report.skipped_existing, report.inserted, report.trimmed
    );
    Ok(())
}

async fn run_trim(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let deleted = techwire_db::trim_to_cap(pool, RETENTION_CAP).await?;
    let total = techwire_db::count_stories(pool).await?;
    println!("trimmed {deleted} stories; {total} remain (cap {RETENTION_CAP})");
    Ok(())
}

async fn run_recent(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let stories = techwire_db::list_recent_stories(pool, limit.clamp(1, 100)).await?;

    if stories.is_empty() {
        println!("no trending stories stored; run `techwire-cli ingest` first");
        return Ok(());
    }

    println!("{:<20}{:<60}SOURCE", "CREATED", "TITLE");
    for story in &stories {
        let created = story.created_at.format("%Y-%m-%d %H:%M").to_string();
        let title: String = story.title.chars().take(57).collect();
        println!("{created:<20}{title:<60}{}", story.source_url);
    }

    Ok(())
}
