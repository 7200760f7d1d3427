//! Database operations for the `trending_stories` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `trending_stories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendingStoryRow {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

/// A story staged for insertion. Rows are immutable once stored; the
/// pipeline never updates an existing story even if the article changed
/// upstream.
pub struct NewTrendingStory<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub image_url: Option<&'a str>,
    pub source_url: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Check whether a story with the given source URL is already stored.
///
/// `source_url` is the dedup key; the pipeline skips candidates that are
/// already present rather than summarizing them again.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn story_exists(pool: &PgPool, source_url: &str) -> Result<bool, DbError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM trending_stories WHERE source_url = $1)",
    )
    .bind(source_url)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Insert a batch of stories in a single transaction.
///
/// The batch is all-or-nothing: if any insert fails the transaction is
/// rolled back and no story from this cycle is persisted. Conflicts on
/// `source_url` are ignored (`ON CONFLICT DO NOTHING`), so a row that
/// appeared between the existence check and the commit does not fail the
/// batch. Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement or the commit fails.
pub async fn insert_stories(
    pool: &PgPool,
    stories: &[NewTrendingStory<'_>],
) -> Result<u64, DbError> {
    if stories.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for story in stories {
        let result = sqlx::query(
            "INSERT INTO trending_stories (title, summary, image_url, source_url, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (source_url) DO NOTHING",
        )
        .bind(story.title)
        .bind(story.summary)
        .bind(story.image_url)
        .bind(story.source_url)
        .bind(story.created_at)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Count all stored stories.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_stories(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trending_stories")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete the oldest stories beyond `cap`, keeping at most `cap` rows.
///
/// Surplus rows are selected oldest-first by `(created_at, id)` (the id
/// tiebreak keeps the order total when timestamps collide) and removed
/// in one transaction. Returns the number of rows deleted (0 when the
/// table is at or under the cap).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the count, delete, or commit fails. The
/// transaction is rolled back on failure, leaving the table untouched.
pub async fn trim_to_cap(pool: &PgPool, cap: i64) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trending_stories")
        .fetch_one(&mut *tx)
        .await?;

    let surplus = total - cap;
    if surplus <= 0 {
        return Ok(0);
    }

    let result = sqlx::query(
        "DELETE FROM trending_stories WHERE id IN ( \
             SELECT id FROM trending_stories \
             ORDER BY created_at ASC, id ASC \
             LIMIT $1)",
    )
    .bind(surplus)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}

/// List the most recent stories, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_stories(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<TrendingStoryRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendingStoryRow>(
        "SELECT id, title, summary, image_url, source_url, created_at \
         FROM trending_stories \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
