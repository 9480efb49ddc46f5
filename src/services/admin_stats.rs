//! Platform-wide statistics for the admin panel.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::category::Category;
use crate::models::progress::{ProgressFilter, ProgressRecord};
use crate::models::user::UserFilter;
use crate::models::video::{Video, VideoFilter};
use crate::services::join;
use crate::services::progress::{self, VideoStats, VideoWithStats};
use crate::store::{RecordStore, StoreResult};

/// How many videos the report ranks by views.
pub const TOP_VIDEO_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminReport {
    pub total_users: i64,
    pub total_categories: i64,
    pub total_videos: i64,
    pub total_progress_records: i64,
    /// Distinct emails with at least one progress record.
    pub active_learners: i64,
    pub total_completions: i64,
    pub total_watch_time: i64,
    pub completion_rate: f64,
    pub top_videos: Vec<VideoWithStats>,
    /// Keyed by category name, last write wins on duplicate names.
    pub categories: BTreeMap<String, CategoryEngagement>,
}

/// Aggregated engagement over every video of a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryEngagement {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_completions: i64,
    pub completion_rate: f64,
}

pub async fn build_admin_report(store: &dyn RecordStore) -> StoreResult<AdminReport> {
    let (user_filter, video_filter, progress_filter) = (
        UserFilter::default(),
        VideoFilter::default(),
        ProgressFilter::default(),
    );
    let (users, categories, videos, records) = tokio::try_join!(
        store.find_users(&user_filter),
        store.find_categories(),
        store.find_videos(&video_filter),
        store.find_progress(&progress_filter),
    )?;

    let report = compile_report(users.len(), &categories, &videos, &records);
    tracing::debug!(
        videos = report.total_videos,
        records = report.total_progress_records,
        "Built admin report"
    );
    Ok(report)
}

/// Pure rollup over already-fetched collections.
pub fn compile_report(
    user_count: usize,
    categories: &[Category],
    videos: &[Video],
    records: &[ProgressRecord],
) -> AdminReport {
    let totals = progress::summarize_learner(records);
    let active_learners = records
        .iter()
        .map(|r| r.user_email.as_str())
        .collect::<HashSet<_>>()
        .len();

    let by_video = join::progress_by_video(records);
    let stats_for = |video: &Video| {
        by_video
            .get(video.id.as_str())
            .map(|rs| progress::summarize_video(rs.iter().copied()))
            .unwrap_or_default()
    };

    let mut ranked: Vec<VideoWithStats> = videos
        .iter()
        .map(|video| VideoWithStats {
            video: video.clone(),
            stats: stats_for(video),
        })
        .filter(|v| v.stats.total_views > 0)
        .collect();
    ranked.sort_by(|a, b| {
        b.stats
            .total_views
            .cmp(&a.stats.total_views)
            .then_with(|| a.video.title.cmp(&b.video.title))
    });
    ranked.truncate(TOP_VIDEO_LIMIT);

    let by_category = join::index_by_category(videos);
    let mut engagement = BTreeMap::new();
    for category in categories {
        let members = by_category
            .get(category.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let (views, completions) = members
            .iter()
            .map(|&v| stats_for(v))
            .fold((0, 0), |(views, completions), s: VideoStats| {
                (views + s.total_views, completions + s.total_completions)
            });
        engagement.insert(
            category.name.clone(),
            CategoryEngagement {
                total_videos: members.len() as i64,
                total_views: views,
                total_completions: completions,
                completion_rate: progress::percentage(completions, views),
            },
        );
    }

    AdminReport {
        total_users: user_count as i64,
        total_categories: categories.len() as i64,
        total_videos: videos.len() as i64,
        total_progress_records: totals.total_videos_watched,
        active_learners: active_learners as i64,
        total_completions: totals.total_videos_completed,
        total_watch_time: totals.total_watch_time,
        completion_rate: totals.completion_rate,
        top_videos: ranked,
        categories: engagement,
    }
}
