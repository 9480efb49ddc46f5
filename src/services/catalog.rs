//! Category and video management.

use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::category::{Category, CategoryInput, CategoryWithVideos};
use crate::models::video::{Video, VideoFilter, VideoInput};
use crate::services::join;
use crate::services::progress::{self, VideoWithStats};
use crate::store::{RecordStore, StoreResult};

/// Categories created the first time the catalog is listed empty: (id, name, icon).
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 9] = [
    ("1", "Fundamentos Inmobiliarios", "Home"),
    ("2", "Marketing y Ventas", "TrendingUp"),
    ("3", "Regulaciones y Ética", "BookOpen"),
    ("4", "Finanzas y Economía", "PieChart"),
    ("5", "Tecnología Inmobiliaria", "Lightbulb"),
    ("6", "Negociación y Cierre", "Award"),
    ("7", "Desarrollo Personal", "User"),
    ("8", "Evaluación de Propiedades", "Building"),
    ("9", "Atención al Cliente", "Users"),
];

/// Insert the default categories. Returns how many were written.
pub async fn seed_default_categories(store: &dyn RecordStore) -> StoreResult<usize> {
    for (id, name, icon) in DEFAULT_CATEGORIES {
        store
            .insert_category(&Category::with_id(id, name, icon))
            .await?;
    }
    tracing::info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
    Ok(DEFAULT_CATEGORIES.len())
}

/// Every category with its videos, seeding the defaults when none exist.
///
/// Seeding only runs on an empty collection. Deleting some of the defaults
/// leaves the listing shorter than `DEFAULT_CATEGORIES`; deleting all of them
/// brings the full set back on the next call.
pub async fn list_categories(store: &dyn RecordStore) -> AppResult<Vec<CategoryWithVideos>> {
    let mut categories = store.find_categories().await?;
    if categories.is_empty() {
        seed_default_categories(store).await?;
        categories = store.find_categories().await?;
    }
    Ok(join::attach_videos(store, categories).await?)
}

pub async fn create_category(store: &dyn RecordStore, input: CategoryInput) -> AppResult<Category> {
    input.validate()?;
    let category = input.into_category();
    store.insert_category(&category).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Created category");
    Ok(category)
}

pub async fn update_category(
    store: &dyn RecordStore,
    id: &str,
    input: &CategoryInput,
) -> AppResult<Category> {
    input.validate()?;
    if !store.update_category(id, input).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    store
        .find_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}

/// Delete a category. Its videos are left in place.
pub async fn delete_category(store: &dyn RecordStore, id: &str) -> AppResult<()> {
    if !store.delete_category(id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    tracing::info!(category_id = %id, "Deleted category");
    Ok(())
}

pub async fn list_videos(store: &dyn RecordStore) -> AppResult<Vec<Video>> {
    Ok(store.find_videos(&VideoFilter::default()).await?)
}

pub async fn create_video(store: &dyn RecordStore, input: VideoInput) -> AppResult<Video> {
    input.validate()?;
    let video = input.into_video();
    store.insert_video(&video).await?;
    tracing::info!(video_id = %video.id, category_id = %video.category_id, "Created video");
    Ok(video)
}

/// Replace every editable field of a video.
pub async fn update_video(
    store: &dyn RecordStore,
    id: &str,
    input: &VideoInput,
) -> AppResult<Video> {
    input.validate()?;
    if !store.update_video(id, input).await? {
        return Err(AppError::NotFound("Video not found".to_string()));
    }
    store
        .find_video(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
}

/// Delete a video. Progress records referencing it are kept.
pub async fn delete_video(store: &dyn RecordStore, id: &str) -> AppResult<()> {
    if !store.delete_video(id).await? {
        return Err(AppError::NotFound("Video not found".to_string()));
    }
    tracing::info!(video_id = %id, "Deleted video");
    Ok(())
}

/// A video with its viewing statistics.
pub async fn video_detail(store: &dyn RecordStore, id: &str) -> AppResult<VideoWithStats> {
    let video = store
        .find_video(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
    Ok(progress::with_stats(store, video).await?)
}
