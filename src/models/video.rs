//! Catalog videos.
//!
//! Wire names follow the frontend contract (`youtubeId`, `releaseDate`,
//! `categoryId`, `match`), while columns stay snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String,
    #[serde(rename = "youtubeId")]
    pub youtube_id: String,
    #[serde(rename = "match")]
    pub match_label: String,
    pub difficulty: String,
    pub rating: f64,
    pub views: i64,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    /// Owning category. Not enforced: the category may have been deleted.
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

/// Editable video fields, used for both creation and full replacement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VideoInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String,
    #[serde(rename = "youtubeId")]
    pub youtube_id: String,
    #[serde(rename = "match")]
    pub match_label: String,
    pub difficulty: String,
    pub rating: f64,
    #[validate(range(min = 0, message = "views must not be negative"))]
    pub views: i64,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    #[serde(rename = "categoryId")]
    #[validate(length(min = 1, message = "categoryId must not be empty"))]
    pub category_id: String,
}

impl VideoInput {
    pub fn into_video(self) -> Video {
        Video {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            duration: self.duration,
            youtube_id: self.youtube_id,
            match_label: self.match_label,
            difficulty: self.difficulty,
            rating: self.rating,
            views: self.views,
            release_date: self.release_date,
            category_id: self.category_id,
            created_at: Utc::now(),
        }
    }

    /// Overwrite every editable field of `video`, keeping its id and creation time.
    pub fn apply(&self, video: &mut Video) {
        video.title.clone_from(&self.title);
        video.description.clone_from(&self.description);
        video.thumbnail.clone_from(&self.thumbnail);
        video.duration.clone_from(&self.duration);
        video.youtube_id.clone_from(&self.youtube_id);
        video.match_label.clone_from(&self.match_label);
        video.difficulty.clone_from(&self.difficulty);
        video.rating = self.rating;
        video.views = self.views;
        video.release_date.clone_from(&self.release_date);
        video.category_id.clone_from(&self.category_id);
    }
}

/// Exact-match filter over the video collection. Unset fields match anything.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    pub category_id: Option<String>,
}

impl VideoFilter {
    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn matches(&self, video: &Video) -> bool {
        self.category_id
            .as_deref()
            .map_or(true, |c| video.category_id == c)
    }
}
