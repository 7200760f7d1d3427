//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring trending-ingest job.

use std::sync::Arc;

use techwire_ingest::IngestRunner;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Every 30 minutes, on the hour and half hour.
const TRENDING_SCHEDULE: &str = "0 0,30 * * * *";

/// Builds and starts the background job scheduler.
///
/// Registers the trending-ingest job and starts the scheduler. Returns the
/// running [`JobScheduler`] handle, which must be kept alive for the
/// lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    runner: Arc<IngestRunner>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_trending_job(&scheduler, runner).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the recurring trending-ingest job.
///
/// The runner's gate serializes executions: a cycle still in flight when
/// the next trigger fires causes that trigger to be skipped rather than
/// overlapped.
async fn register_trending_job(
    scheduler: &JobScheduler,
    runner: Arc<IngestRunner>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(TRENDING_SCHEDULE, move |_uuid, _lock| {
        let runner = Arc::clone(&runner);

        Box::pin(async move {
            tracing::info!("scheduler: starting trending-ingest run");
            match runner.run_if_idle().await {
                Some(report) => tracing::info!(
                    fetched = report.fetched,
                    inserted = report.inserted,
                    trimmed = report.trimmed,
                    "scheduler: trending-ingest run complete"
                ),
                None => tracing::info!("scheduler: trending-ingest trigger skipped"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
