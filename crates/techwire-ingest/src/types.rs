/// A fetched article that passed the topic filter but has not been
/// deduplicated or summarized yet.
#[derive(Debug, Clone)]
pub struct CandidateStory {
    pub title: String,
    /// Raw description (or content fallback); summarized before storage.
    pub description: String,
    pub image_url: Option<String>,
    /// Canonical article URL; the dedup key.
    pub source_url: String,
}

/// Counts from one completed pipeline cycle, for logging and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Candidates produced by the fetch stage (post topic filter).
    pub fetched: usize,
    /// Candidates skipped because their source URL was already stored.
    pub skipped_existing: usize,
    /// Rows actually committed this cycle.
    pub inserted: u64,
    /// Rows removed by the retention trimmer.
    pub trimmed: u64,
}
