//! Progress aggregation: per-video statistics and per-learner totals.
//!
//! Every figure counts progress *records*. If the store holds duplicate
//! records for a (user, video) pair, each one is counted. Completion comes
//! from the `completed` flag only, never from `progress_percentage`.

use serde::Serialize;

use crate::models::progress::{ProgressFilter, ProgressRecord};
use crate::models::video::Video;
use crate::store::{RecordStore, StoreResult};

/// Statistics derived from every progress record of one video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VideoStats {
    pub total_views: i64,
    pub total_completions: i64,
    /// Percentage in [0, 100].
    pub average_completion_rate: f64,
    /// Mean watch time in seconds, floor-divided.
    pub average_watch_time: i64,
}

/// A video together with its statistics block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoWithStats {
    #[serde(flatten)]
    pub video: Video,
    pub stats: VideoStats,
}

/// Totals over every progress record of one learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LearnerTotals {
    pub total_videos_watched: i64,
    pub total_videos_completed: i64,
    pub total_watch_time: i64,
    pub completion_rate: f64,
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn summarize_video<'a>(records: impl IntoIterator<Item = &'a ProgressRecord>) -> VideoStats {
    let (views, completions, watch_time) = tally(records);
    VideoStats {
        total_views: views,
        total_completions: completions,
        average_completion_rate: percentage(completions, views),
        average_watch_time: if views == 0 { 0 } else { watch_time.div_euclid(views) },
    }
}

pub fn summarize_learner<'a>(
    records: impl IntoIterator<Item = &'a ProgressRecord>,
) -> LearnerTotals {
    let (watched, completed, watch_time) = tally(records);
    LearnerTotals {
        total_videos_watched: watched,
        total_videos_completed: completed,
        total_watch_time: watch_time,
        completion_rate: percentage(completed, watched),
    }
}

/// (record count, completed count, summed watch time)
///
/// Sums saturate at `i64::MAX` so rows written outside the validated path
/// cannot wrap the totals negative.
fn tally<'a>(records: impl IntoIterator<Item = &'a ProgressRecord>) -> (i64, i64, i64) {
    records
        .into_iter()
        .fold((0, 0, 0), |(count, completed, watch_time), r| {
            (
                count + 1,
                completed + i64::from(r.completed),
                watch_time.saturating_add(r.watch_time.max(0)),
            )
        })
}

/// Statistics for `video_id`. Unknown videos yield all-zero statistics.
pub async fn compute_video_stats(
    store: &dyn RecordStore,
    video_id: &str,
) -> StoreResult<VideoStats> {
    let records = store
        .find_progress(&ProgressFilter::default().video(video_id))
        .await?;
    let stats = summarize_video(&records);
    tracing::debug!(
        video_id,
        total_views = stats.total_views,
        total_completions = stats.total_completions,
        "Computed video stats"
    );
    Ok(stats)
}

/// Attach freshly computed statistics to `video`.
pub async fn with_stats(store: &dyn RecordStore, video: Video) -> StoreResult<VideoWithStats> {
    let stats = compute_video_stats(store, &video.id).await?;
    Ok(VideoWithStats { video, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::fixtures::record;
    use crate::store::MemoryStore;

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize_video(&[]), VideoStats::default());
        assert_eq!(summarize_learner(&[]), LearnerTotals::default());
    }

    #[test]
    fn video_with_three_records() {
        let records = vec![
            record("a@x.com", "v", 100, true, 0),
            record("b@x.com", "v", 200, false, 1),
            record("c@x.com", "v", 300, false, 2),
        ];
        let stats = summarize_video(&records);
        assert_eq!(stats.total_views, 3);
        assert_eq!(stats.total_completions, 1);
        assert!((stats.average_completion_rate - 33.333).abs() < 0.01);
        assert_eq!(stats.average_watch_time, 200);
    }

    #[test]
    fn average_watch_time_floors() {
        let records = vec![
            record("a@x.com", "v", 10, false, 0),
            record("b@x.com", "v", 11, false, 1),
        ];
        assert_eq!(summarize_video(&records).average_watch_time, 10);
    }

    #[test]
    fn duplicate_pairs_all_count() {
        let records = vec![
            record("a@x.com", "v", 100, false, 0),
            record("a@x.com", "v", 100, true, 1),
        ];
        let stats = summarize_video(&records);
        assert_eq!(stats.total_views, 2);
        assert_eq!(stats.total_completions, 1);
    }

    #[test]
    fn completion_ignores_percentage() {
        let mut r = record("a@x.com", "v", 100, false, 0);
        r.progress_percentage = 100.0;
        assert_eq!(summarize_video([&r]).total_completions, 0);
    }

    #[test]
    fn learner_totals() {
        let records = vec![
            record("a@x.com", "V1", 1200, false, 0),
            record("a@x.com", "V2", 1800, true, 1),
        ];
        let totals = summarize_learner(&records);
        assert_eq!(totals.total_videos_watched, 2);
        assert_eq!(totals.total_videos_completed, 1);
        assert_eq!(totals.total_watch_time, 3000);
        assert_eq!(totals.completion_rate, 50.0);
    }

    #[test]
    fn rates_stay_in_bounds() {
        let max_watch = 500;
        let records: Vec<_> = (0..7)
            .map(|i| record("a@x.com", "v", (i * 73) % max_watch, i % 3 == 0, i))
            .collect();
        let stats = summarize_video(&records);
        assert!(stats.total_completions <= stats.total_views);
        assert!((0.0..=100.0).contains(&stats.average_completion_rate));
        assert!(stats.average_watch_time >= 0);
        assert!(stats.average_watch_time <= max_watch * stats.total_views);
    }

    #[test]
    fn huge_watch_times_saturate() {
        let records = vec![
            record("a@x.com", "v", i64::MAX, false, 0),
            record("b@x.com", "v", i64::MAX, true, 1),
        ];
        let stats = summarize_video(&records);
        assert_eq!(stats.total_views, 2);
        assert_eq!(stats.average_watch_time, i64::MAX / 2);

        let totals = summarize_learner(&records);
        assert_eq!(totals.total_watch_time, i64::MAX);
    }

    #[tokio::test]
    async fn unknown_video_yields_zero_stats() {
        let store = MemoryStore::new();
        store
            .insert_progress(&record("a@x.com", "other", 50, true, 0))
            .await
            .unwrap();
        let stats = compute_video_stats(&store, "missing").await.unwrap();
        assert_eq!(stats, VideoStats::default());
    }

    #[tokio::test]
    async fn stats_only_count_matching_video() {
        let store = MemoryStore::new();
        for r in [
            record("a@x.com", "v1", 100, true, 0),
            record("b@x.com", "v1", 300, false, 1),
            record("a@x.com", "v2", 900, true, 2),
        ] {
            store.insert_progress(&r).await.unwrap();
        }
        let stats = compute_video_stats(&store, "v1").await.unwrap();
        assert_eq!(stats.total_views, 2);
        assert_eq!(stats.total_completions, 1);
        assert_eq!(stats.average_completion_rate, 50.0);
        assert_eq!(stats.average_watch_time, 200);
    }
}
