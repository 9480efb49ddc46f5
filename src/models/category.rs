//! Video categories and the denormalized category-with-videos view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::video::Video;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Build a category with an explicit identifier (used for the seeded defaults).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub icon: String,
}

impl CategoryInput {
    pub fn into_category(self) -> Category {
        Category::with_id(Uuid::new_v4().to_string(), self.name, self.icon)
    }
}

/// A category together with the videos that currently reference it.
///
/// The video list is resolved at read time and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithVideos {
    #[serde(flatten)]
    pub category: Category,
    pub videos: Vec<Video>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_generates_fresh_ids() {
        let input = CategoryInput {
            name: "Marketing".to_string(),
            icon: "TrendingUp".to_string(),
        };
        let a = input.clone().into_category();
        let b = input.into_category();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Marketing");
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = CategoryInput {
            name: String::new(),
            icon: "Home".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn videos_are_flattened_next_to_category_fields() {
        let view = CategoryWithVideos {
            category: Category::with_id("1", "Fundamentos", "Home"),
            videos: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["icon"], "Home");
        assert!(json["videos"].as_array().unwrap().is_empty());
    }
}
