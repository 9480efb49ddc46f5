//! Site settings and banner video.

use chrono::Utc;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::settings::{BannerVideo, BannerVideoInput, Settings, SettingsUpdate};
use crate::store::{RecordStore, StoreResult};

/// Stored settings, creating the defaults on first access.
pub async fn get_settings(store: &dyn RecordStore) -> StoreResult<Settings> {
    if let Some(settings) = store.find_settings().await? {
        return Ok(settings);
    }
    let settings = Settings::default();
    store.upsert_settings(&settings).await?;
    tracing::info!(settings_id = %settings.id, "Created default settings");
    Ok(settings)
}

/// Apply the present fields of `update` and persist the result.
pub async fn update_settings(
    store: &dyn RecordStore,
    update: &SettingsUpdate,
) -> StoreResult<Settings> {
    let mut settings = store.find_settings().await?.unwrap_or_default();
    update.apply(&mut settings, Utc::now());
    store.upsert_settings(&settings).await?;
    Ok(settings)
}

pub async fn get_banner(store: &dyn RecordStore) -> StoreResult<Option<BannerVideo>> {
    store.find_banner().await
}

/// Replace the banner video.
pub async fn set_banner(store: &dyn RecordStore, input: BannerVideoInput) -> AppResult<BannerVideo> {
    input.validate()?;
    let banner = input.into_banner();
    store.replace_banner(&banner).await?;
    tracing::info!(banner_id = %banner.id, "Replaced banner video");
    Ok(banner)
}

pub async fn clear_banner(store: &dyn RecordStore) -> StoreResult<u64> {
    store.clear_banner().await
}
