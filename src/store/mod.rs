//! Record store port and its implementations.
//!
//! Every collection the service persists goes through [`RecordStore`]. The
//! aggregation services take the store as an argument and never hold a
//! global handle, so the same code runs against Postgres in production and
//! against [`MemoryStore`] in tests or when the database is unreachable.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::db;
use crate::models::category::{Category, CategoryInput};
use crate::models::progress::{ProgressFilter, ProgressRecord, ProgressUpdate};
use crate::models::settings::{BannerVideo, Settings};
use crate::models::user::{User, UserFilter};
use crate::models::video::{Video, VideoFilter, VideoInput};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failure reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    /// Connectivity failures become [`StoreError::Unavailable`]; anything
    /// else is a query-level [`StoreError::Database`] error.
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed collections for categories, videos, progress, users, settings and
/// the banner video.
///
/// `find_*` results are unordered unless noted. Update and delete operations
/// report whether a record matched instead of failing on a miss.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> StoreResult<()>;

    async fn find_categories(&self) -> StoreResult<Vec<Category>>;
    async fn find_category(&self, id: &str) -> StoreResult<Option<Category>>;
    async fn insert_category(&self, category: &Category) -> StoreResult<()>;
    async fn update_category(&self, id: &str, input: &CategoryInput) -> StoreResult<bool>;
    async fn delete_category(&self, id: &str) -> StoreResult<bool>;

    async fn find_videos(&self, filter: &VideoFilter) -> StoreResult<Vec<Video>>;
    async fn find_video(&self, id: &str) -> StoreResult<Option<Video>>;
    async fn insert_video(&self, video: &Video) -> StoreResult<()>;
    async fn update_video(&self, id: &str, input: &VideoInput) -> StoreResult<bool>;
    async fn delete_video(&self, id: &str) -> StoreResult<bool>;

    async fn find_progress(&self, filter: &ProgressFilter) -> StoreResult<Vec<ProgressRecord>>;
    /// The most recently watched record matching `filter`. Ties on
    /// `last_watched` resolve to the greatest `id` in byte order.
    async fn find_one_progress(
        &self,
        filter: &ProgressFilter,
    ) -> StoreResult<Option<ProgressRecord>>;
    async fn insert_progress(&self, record: &ProgressRecord) -> StoreResult<()>;
    /// Apply `update` to the record with the given id, returning it afterwards.
    async fn update_progress(
        &self,
        id: &str,
        update: &ProgressUpdate,
    ) -> StoreResult<Option<ProgressRecord>>;

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;
    async fn find_one_user(&self, filter: &UserFilter) -> StoreResult<Option<User>>;
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn delete_user(&self, id: &str) -> StoreResult<bool>;

    async fn find_settings(&self) -> StoreResult<Option<Settings>>;
    /// Insert or replace the settings row keyed by `settings.id`.
    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<()>;

    async fn find_banner(&self) -> StoreResult<Option<BannerVideo>>;
    /// Remove any existing banner and store `banner` as the only one.
    async fn replace_banner(&self, banner: &BannerVideo) -> StoreResult<()>;
    async fn clear_banner(&self) -> StoreResult<u64>;
}

/// Open the configured store.
///
/// Without `DATABASE_URL`, or when Postgres cannot be reached or migrated,
/// falls back to an ephemeral [`MemoryStore`].
pub async fn connect(config: &AppConfig) -> Arc<dyn RecordStore> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory store");
        return Arc::new(MemoryStore::new());
    };

    let pool = match db::create_pool(url, config.database_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Database connection failed, using in-memory store");
            return Arc::new(MemoryStore::new());
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        tracing::warn!(error = %e, "Database migration failed, using in-memory store");
        return Arc::new(MemoryStore::new());
    }

    tracing::info!("Connected to PostgreSQL store");
    Arc::new(PgStore::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_errors_are_unavailable() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn query_errors_stay_database_errors() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(err.to_string().starts_with("Database error"));
    }

    #[tokio::test]
    async fn connect_without_url_uses_memory() {
        let store = connect(&AppConfig::default()).await;
        assert!(store.ping().await.is_ok());
        assert!(format!("{store:?}").contains("MemoryStore"));
    }
}
