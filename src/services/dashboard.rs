//! Per-learner dashboard: totals, recently watched videos and category rollups.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::category::Category;
use crate::models::progress::{ProgressFilter, ProgressRecord};
use crate::models::video::{Video, VideoFilter};
use crate::services::join;
use crate::services::progress::{self, LearnerTotals, VideoWithStats};
use crate::store::{RecordStore, StoreResult};

/// How many recently watched videos the dashboard lists.
pub const RECENT_VIDEO_LIMIT: usize = 5;

/// Everything the progress page shows for one learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDashboard {
    #[serde(flatten)]
    pub totals: LearnerTotals,
    pub recent_videos: Vec<VideoWithStats>,
    /// Keyed by category name. Categories sharing a name overwrite each other.
    pub progress_by_category: BTreeMap<String, CategoryProgress>,
}

/// A learner's progress within one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub total_videos: i64,
    pub watched_videos: i64,
    pub completed_videos: i64,
    pub completion_rate: f64,
}

/// Build the dashboard for `user_email`.
///
/// The email is an opaque key: unknown users simply get an empty dashboard.
/// The separate reads are not transactional, so concurrent writes may show up
/// in some sections and not others.
pub async fn build_dashboard(
    store: &dyn RecordStore,
    user_email: &str,
) -> StoreResult<UserDashboard> {
    let progress_filter = ProgressFilter::default().user(user_email);
    let video_filter = VideoFilter::default();
    let (records, categories, videos) = tokio::try_join!(
        store.find_progress(&progress_filter),
        store.find_categories(),
        store.find_videos(&video_filter),
    )?;

    let totals = progress::summarize_learner(&records);
    let recent_videos = recent_videos(store, &records).await?;
    let progress_by_category = category_progress(&categories, &videos, &records);

    tracing::debug!(
        user_email,
        watched = totals.total_videos_watched,
        recent = recent_videos.len(),
        "Built user dashboard"
    );

    Ok(UserDashboard {
        totals,
        recent_videos,
        progress_by_category,
    })
}

/// Records ordered by `last_watched`, newest first. Ties keep store order.
pub fn most_recent(records: &[ProgressRecord], limit: usize) -> Vec<&ProgressRecord> {
    let mut ordered: Vec<&ProgressRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.last_watched.cmp(&a.last_watched));
    ordered.truncate(limit);
    ordered
}

/// Resolve the newest records to their videos, dropping deleted ones.
async fn recent_videos(
    store: &dyn RecordStore,
    records: &[ProgressRecord],
) -> StoreResult<Vec<VideoWithStats>> {
    let mut resolved = Vec::with_capacity(RECENT_VIDEO_LIMIT);
    for record in most_recent(records, RECENT_VIDEO_LIMIT) {
        let Some(video) = store.find_video(&record.video_id).await? else {
            continue;
        };
        resolved.push(progress::with_stats(store, video).await?);
    }
    Ok(resolved)
}

/// Roll the learner's records up per category.
pub fn category_progress(
    categories: &[Category],
    videos: &[Video],
    records: &[ProgressRecord],
) -> BTreeMap<String, CategoryProgress> {
    let by_category = join::index_by_category(videos);
    let mut rollup = BTreeMap::new();

    for category in categories {
        let members = by_category
            .get(category.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let ids = join::video_ids(members.iter().copied());
        let (watched, _) = join::partition_by_videos(records, &ids);
        let watched_videos = watched.len() as i64;
        let completed_videos = watched.iter().filter(|r| r.completed).count() as i64;

        rollup.insert(
            category.name.clone(),
            CategoryProgress {
                total_videos: members.len() as i64,
                watched_videos,
                completed_videos,
                completion_rate: progress::percentage(completed_videos, watched_videos),
            },
        );
    }

    rollup
}
