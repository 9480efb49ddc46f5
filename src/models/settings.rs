//! Site-wide branding settings and the home-page banner video.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: String,
    pub logo_url: String,
    pub company_name: String,
    pub login_background_url: String,
    pub banner_url: String,
    pub login_title: String,
    pub login_subtitle: String,
    pub theme: String,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            logo_url: String::new(),
            company_name: "Realty ONE Group Mexico".to_string(),
            login_background_url: String::new(),
            banner_url: String::new(),
            login_title: "Iniciar Sesión".to_string(),
            login_subtitle: "Accede a tu plataforma de capacitación inmobiliaria".to_string(),
            theme: "dark".to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial settings update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub logo_url: Option<String>,
    pub company_name: Option<String>,
    pub login_background_url: Option<String>,
    pub banner_url: Option<String>,
    pub login_title: Option<String>,
    pub login_subtitle: Option<String>,
    pub theme: Option<String>,
}

impl SettingsUpdate {
    pub fn apply(&self, settings: &mut Settings, now: DateTime<Utc>) {
        let fields = [
            (&self.logo_url, &mut settings.logo_url),
            (&self.company_name, &mut settings.company_name),
            (&self.login_background_url, &mut settings.login_background_url),
            (&self.banner_url, &mut settings.banner_url),
            (&self.login_title, &mut settings.login_title),
            (&self.login_subtitle, &mut settings.login_subtitle),
            (&self.theme, &mut settings.theme),
        ];
        for (update, current) in fields {
            if let Some(value) = update {
                current.clone_from(value);
            }
        }
        settings.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BannerVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(rename = "youtubeId")]
    pub youtube_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BannerVideoInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(rename = "youtubeId")]
    #[validate(length(min = 1, message = "youtubeId must not be empty"))]
    pub youtube_id: String,
}

impl BannerVideoInput {
    pub fn into_banner(self) -> BannerVideo {
        BannerVideo {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            youtube_id: self.youtube_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_branding() {
        let s = Settings::default();
        assert_eq!(s.company_name, "Realty ONE Group Mexico");
        assert_eq!(s.theme, "dark");
        assert!(s.logo_url.is_empty());
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let mut s = Settings::default();
        let now = Utc::now();
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"companyName":"Acme","theme":null}"#).unwrap();
        update.apply(&mut s, now);
        assert_eq!(s.company_name, "Acme");
        assert_eq!(s.theme, "dark");
        assert_eq!(s.login_title, "Iniciar Sesión");
        assert_eq!(s.updated_at, now);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("loginBackgroundUrl").is_some());
        assert!(json.get("updated_at").is_some());
    }
}
