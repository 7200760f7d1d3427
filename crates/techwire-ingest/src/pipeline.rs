//! Pipeline orchestration and the single-flight run guard.

use chrono::Utc;
use sqlx::PgPool;
use techwire_db::NewTrendingStory;
use techwire_newsapi::NewsApiClient;
use techwire_summarizer::Summarizer;

use crate::fetch::fetch_candidates;
use crate::types::{CandidateStory, IngestReport};

/// Maximum stories kept in the table; the trimmer removes the oldest
/// surplus after each cycle.
pub const RETENTION_CAP: i64 = 200;

/// Run one full ingestion cycle.
///
/// 1. Fetch candidates from NewsAPI (topic-filtered, newest first).
/// 2. Skip candidates whose source URL is already stored; existing rows
///    are never updated.
/// 3. Summarize each remaining candidate's description, sequentially.
/// 4. Insert the batch in one transaction, all-or-nothing. A commit
///    failure is logged and the cycle ends with zero inserts; the next
///    scheduled cycle re-fetches the same stories.
/// 5. Trim the table to [`RETENTION_CAP`], strictly after the commit; a
///    trim failure cannot affect the committed rows.
///
/// No stage error escapes this function; every failure degrades to "no
/// new data this cycle" and is observable only via logs.
pub async fn run_trending_ingest(
    pool: &PgPool,
    news: Option<&NewsApiClient>,
    summarizer: &Summarizer,
) -> IngestReport {
    let mut report = IngestReport::default();

    let candidates = fetch_candidates(news).await;
    report.fetched = candidates.len();
    if candidates.is_empty() {
        tracing::info!("no stories fetched this cycle");
        return report;
    }

    let staged = stage_new_stories(pool, summarizer, &candidates, &mut report).await;

    if !staged.is_empty() {
        let rows: Vec<NewTrendingStory<'_>> = staged
            .iter()
            .map(|s| NewTrendingStory {
                title: &s.candidate.title,
                summary: &s.summary,
                image_url: s.candidate.image_url.as_deref(),
                source_url: &s.candidate.source_url,
                created_at: s.created_at,
            })
            .collect();

        match techwire_db::insert_stories(pool, &rows).await {
            Ok(inserted) => {
                report.inserted = inserted;
                tracing::info!(inserted, "new trending stories added");
            }
            Err(e) => {
                tracing::error!(error = %e, "story batch commit failed; cycle discarded");
                return report;
            }
        }
    } else {
        tracing::info!("no new stories to insert this cycle");
    }

    match techwire_db::trim_to_cap(pool, RETENTION_CAP).await {
        Ok(0) => {}
        Ok(trimmed) => {
            report.trimmed = trimmed;
            tracing::info!(trimmed, "trimmed old trending stories");
        }
        Err(e) => {
            tracing::warn!(error = %e, "trimming failed (ignored)");
        }
    }

    report
}

struct StagedStory<'a> {
    candidate: &'a CandidateStory,
    summary: String,
    created_at: chrono::DateTime<Utc>,
}

/// Dedupe against stored source URLs and summarize what remains.
///
/// Summarization runs only for genuinely new candidates: it is the
/// expensive call. An existence-check failure skips that candidate for
/// this cycle rather than risking a duplicate summary insert.
async fn stage_new_stories<'a>(
    pool: &PgPool,
    summarizer: &Summarizer,
    candidates: &'a [CandidateStory],
    report: &mut IngestReport,
) -> Vec<StagedStory<'a>> {
    let mut staged = Vec::new();

    for candidate in candidates {
        match techwire_db::story_exists(pool, &candidate.source_url).await {
            Ok(true) => {
                report.skipped_existing += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(url = %candidate.source_url, error = %e, "existence check failed; skipping candidate");
                continue;
            }
        }

        let summary = summarizer.summarize(&candidate.description).await;
        staged.push(StagedStory {
            candidate,
            summary,
            created_at: Utc::now(),
        });
    }

    staged
}

/// Owns the pipeline's shared resources and serializes executions.
///
/// The scheduler and the startup run both go through [`run_if_idle`]: if a
/// cycle is already in flight the trigger is skipped, so at most one
/// pipeline execution exists at any time even when a run outlasts the
/// schedule interval.
///
/// [`run_if_idle`]: IngestRunner::run_if_idle
pub struct IngestRunner {
    pool: PgPool,
    news: Option<NewsApiClient>,
    summarizer: Summarizer,
    gate: tokio::sync::Mutex<()>,
}

impl IngestRunner {
    #[must_use]
    pub fn new(pool: PgPool, news: Option<NewsApiClient>, summarizer: Summarizer) -> Self {
        Self {
            pool,
            news,
            summarizer,
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one cycle unless another is already in flight.
    ///
    /// Returns `None` when the trigger was skipped because of an active run.
    pub async fn run_if_idle(&self) -> Option<IngestReport> {
        let Ok(_guard) = self.gate.try_lock() else {
            tracing::warn!("ingest cycle already in flight; skipping trigger");
            return None;
        };

        Some(run_trending_ingest(&self.pool, self.news.as_ref(), &self.summarizer).await)
    }

    /// Run one cycle, waiting for any active run to finish first.
    ///
    /// Used by the CLI, where a queued second run is less surprising than a
    /// silently skipped one.
    pub async fn run(&self) -> IngestReport {
        let _guard = self.gate.lock().await;
        run_trending_ingest(&self.pool, self.news.as_ref(), &self.summarizer).await
    }
}
