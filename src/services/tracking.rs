//! Progress reports from the player.
//!
//! A report for a pair that already has a record updates the most recently
//! watched one; otherwise a new record is created. The store does not enforce
//! uniqueness, so concurrent first reports for the same pair can still both
//! insert.

use chrono::Utc;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::progress::{ProgressFilter, ProgressRecord, ProgressReport, ProgressSnapshot};
use crate::store::{RecordStore, StoreResult};

pub async fn record_progress(
    store: &dyn RecordStore,
    report: ProgressReport,
) -> AppResult<ProgressRecord> {
    report.validate()?;
    let now = Utc::now();
    let filter = ProgressFilter::pair(&report.user_email, &report.video_id);

    if let Some(existing) = store.find_one_progress(&filter).await? {
        let updated = store
            .update_progress(&existing.id, &report.as_update(now))
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Progress record {} vanished during update", existing.id))
            })?;
        tracing::debug!(
            user_email = %updated.user_email,
            video_id = %updated.video_id,
            completed = updated.completed,
            "Updated progress"
        );
        return Ok(updated);
    }

    let record = report.into_record(now);
    store.insert_progress(&record).await?;
    tracing::debug!(
        user_email = %record.user_email,
        video_id = %record.video_id,
        "Created progress record"
    );
    Ok(record)
}

/// Current progress for a pair, zeroed when the user never watched the video.
pub async fn get_progress(
    store: &dyn RecordStore,
    user_email: &str,
    video_id: &str,
) -> StoreResult<ProgressSnapshot> {
    let record = store
        .find_one_progress(&ProgressFilter::pair(user_email, video_id))
        .await?;
    Ok(record
        .map(ProgressSnapshot::from)
        .unwrap_or_else(|| ProgressSnapshot::unwatched(user_email, video_id)))
}
