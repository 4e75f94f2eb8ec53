//! Scheduled hygiene sweep for lapsed holds.
//!
//! Marks stale pending rows `expired` and frees their booths. The lazy
//! read-time predicate stays the source of truth for exclusivity; this job
//! only keeps the tables tidy and availability listings fresh.

use crate::service::ReservationEngine;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Register the expiry sweep on the shared scheduler.
///
/// `schedule` is a cron expression; the API binary passes one tick per
/// minute.
pub async fn register_expiry_sweep(
    scheduler: &JobScheduler,
    engine: ReservationEngine,
    schedule: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let engine = engine.clone();
        Box::pin(async move {
            match engine.sweep_expired().await {
                Ok(0) => {}
                Ok(count) => tracing::debug!(count, "Expiry sweep released holds"),
                Err(e) => tracing::error!(error = %e, "Expiry sweep failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(schedule, "Registered reservation expiry sweep");
    Ok(())
}
