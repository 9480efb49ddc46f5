//! In-process record store.
//!
//! Used when no database is configured or reachable, and by tests. Data lives
//! only as long as the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::category::{Category, CategoryInput};
use crate::models::progress::{ProgressFilter, ProgressRecord, ProgressUpdate};
use crate::models::settings::{BannerVideo, Settings};
use crate::models::user::{User, UserFilter};
use crate::models::video::{Video, VideoFilter, VideoInput};
use crate::store::{RecordStore, StoreResult};

#[derive(Debug, Default)]
struct Collections {
    categories: Vec<Category>,
    videos: Vec<Video>,
    progress: Vec<ProgressRecord>,
    users: Vec<User>,
    settings: Option<Settings>,
    banner: Option<BannerVideo>,
}

/// [`RecordStore`] backed by vectors behind a single lock.
///
/// Collections keep insertion order, which is also the order `find_*`
/// returns.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Remove the first element matching `pred`, reporting whether one was found.
fn remove_first<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(idx) => {
            items.remove(idx);
            true
        }
        None => false,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn find_category(&self, id: &str) -> StoreResult<Option<Category>> {
        let data = self.inner.read().await;
        Ok(data.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.inner.write().await.categories.push(category.clone());
        Ok(())
    }

    async fn update_category(&self, id: &str, input: &CategoryInput) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        match data.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.name.clone_from(&input.name);
                category.icon.clone_from(&input.icon);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, id: &str) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        Ok(remove_first(&mut data.categories, |c| c.id == id))
    }

    async fn find_videos(&self, filter: &VideoFilter) -> StoreResult<Vec<Video>> {
        let data = self.inner.read().await;
        Ok(data
            .videos
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    async fn find_video(&self, id: &str) -> StoreResult<Option<Video>> {
        let data = self.inner.read().await;
        Ok(data.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn insert_video(&self, video: &Video) -> StoreResult<()> {
        self.inner.write().await.videos.push(video.clone());
        Ok(())
    }

    async fn update_video(&self, id: &str, input: &VideoInput) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        match data.videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                input.apply(video);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_video(&self, id: &str) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        Ok(remove_first(&mut data.videos, |v| v.id == id))
    }

    async fn find_progress(&self, filter: &ProgressFilter) -> StoreResult<Vec<ProgressRecord>> {
        let data = self.inner.read().await;
        Ok(data
            .progress
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_one_progress(
        &self,
        filter: &ProgressFilter,
    ) -> StoreResult<Option<ProgressRecord>> {
        let data = self.inner.read().await;
        // Ties on last_watched go to the greatest id, matching PgStore.
        Ok(data
            .progress
            .iter()
            .filter(|r| filter.matches(r))
            .max_by(|a, b| {
                a.last_watched
                    .cmp(&b.last_watched)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned())
    }

    async fn insert_progress(&self, record: &ProgressRecord) -> StoreResult<()> {
        self.inner.write().await.progress.push(record.clone());
        Ok(())
    }

    async fn update_progress(
        &self,
        id: &str,
        update: &ProgressUpdate,
    ) -> StoreResult<Option<ProgressRecord>> {
        let mut data = self.inner.write().await;
        Ok(data.progress.iter_mut().find(|r| r.id == id).map(|record| {
            update.apply(record);
            record.clone()
        }))
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let data = self.inner.read().await;
        Ok(data
            .users
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect())
    }

    async fn find_one_user(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| filter.matches(u)).cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        self.inner.write().await.users.push(user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        Ok(remove_first(&mut data.users, |u| u.id == id))
    }

    async fn find_settings(&self) -> StoreResult<Option<Settings>> {
        Ok(self.inner.read().await.settings.clone())
    }

    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<()> {
        self.inner.write().await.settings = Some(settings.clone());
        Ok(())
    }

    async fn find_banner(&self) -> StoreResult<Option<BannerVideo>> {
        Ok(self.inner.read().await.banner.clone())
    }

    async fn replace_banner(&self, banner: &BannerVideo) -> StoreResult<()> {
        self.inner.write().await.banner = Some(banner.clone());
        Ok(())
    }

    async fn clear_banner(&self) -> StoreResult<u64> {
        let removed = self.inner.write().await.banner.take();
        Ok(u64::from(removed.is_some()))
    }
}
