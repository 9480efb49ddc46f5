//! Category/video and video/progress joins.
//!
//! Reads go straight to the store on every call. Videos whose category no
//! longer exists are never attached to any category but stay retrievable on
//! their own.

use std::collections::{HashMap, HashSet};

use crate::models::category::{Category, CategoryWithVideos};
use crate::models::progress::ProgressRecord;
use crate::models::video::{Video, VideoFilter};
use crate::store::{RecordStore, StoreResult};

/// Videos that reference `category_id`.
pub async fn videos_in_category(
    store: &dyn RecordStore,
    category_id: &str,
) -> StoreResult<Vec<Video>> {
    store
        .find_videos(&VideoFilter::default().category(category_id))
        .await
}

/// Resolve the member videos of each category, preserving category order.
pub async fn attach_videos(
    store: &dyn RecordStore,
    categories: Vec<Category>,
) -> StoreResult<Vec<CategoryWithVideos>> {
    let mut resolved = Vec::with_capacity(categories.len());
    for category in categories {
        let videos = videos_in_category(store, &category.id).await?;
        resolved.push(CategoryWithVideos { category, videos });
    }
    Ok(resolved)
}

/// Group an already-fetched video list by owning category id.
pub fn index_by_category(videos: &[Video]) -> HashMap<&str, Vec<&Video>> {
    let mut index: HashMap<&str, Vec<&Video>> = HashMap::new();
    for video in videos {
        index.entry(video.category_id.as_str()).or_default().push(video);
    }
    index
}

pub fn video_ids<'a>(videos: impl IntoIterator<Item = &'a Video>) -> HashSet<&'a str> {
    videos.into_iter().map(|v| v.id.as_str()).collect()
}

/// Split `records` into those referencing one of `video_ids` and the rest.
pub fn partition_by_videos<'a>(
    records: &'a [ProgressRecord],
    video_ids: &HashSet<&str>,
) -> (Vec<&'a ProgressRecord>, Vec<&'a ProgressRecord>) {
    records
        .iter()
        .partition(|r| video_ids.contains(r.video_id.as_str()))
}

/// Group progress records by the video they reference.
pub fn progress_by_video(records: &[ProgressRecord]) -> HashMap<&str, Vec<&ProgressRecord>> {
    let mut index: HashMap<&str, Vec<&ProgressRecord>> = HashMap::new();
    for record in records {
        index.entry(record.video_id.as_str()).or_default().push(record);
    }
    index
}
