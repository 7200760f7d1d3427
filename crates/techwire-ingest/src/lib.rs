//! Trending-story ingestion pipeline.
//!
//! One cycle runs Fetch → Filter → Summarize (per new item) → Persist →
//! Trim. Every stage degrades on failure: a broken fetch or commit means
//! zero new rows this cycle, never an error to the caller. The scheduler
//! and the CLI both drive cycles through [`IngestRunner`], which keeps at
//! most one execution in flight.

pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod types;

pub use fetch::fetch_candidates;
pub use filter::matches_topic;
pub use pipeline::{run_trending_ingest, IngestRunner, RETENTION_CAP};
pub use types::{CandidateStory, IngestReport};
