//! Per-user viewing progress.
//!
//! A record is logically unique per (user email, video id) pair, but nothing
//! enforces it. When duplicates exist, the most recently watched one is the
//! authoritative record for that pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Upper bound on a reported `watch_time`: one year of seconds.
pub const MAX_WATCH_TIME: i64 = 31_536_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProgressRecord {
    pub id: String,
    pub user_email: String,
    pub video_id: String,
    /// Informational only; completion is tracked by `completed`.
    pub progress_percentage: f64,
    /// Seconds watched.
    pub watch_time: i64,
    pub completed: bool,
    pub last_watched: DateTime<Utc>,
}

/// A progress report sent by the player.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProgressReport {
    #[validate(length(min = 1, message = "user_email must not be empty"))]
    pub user_email: String,
    #[validate(length(min = 1, message = "video_id must not be empty"))]
    pub video_id: String,
    #[validate(range(min = 0.0, max = 100.0, message = "progress_percentage must be within 0-100"))]
    pub progress_percentage: f64,
    #[validate(range(min = 0, max = 31_536_000, message = "watch_time must be within 0-31536000"))]
    pub watch_time: i64,
    pub completed: bool,
}

impl ProgressReport {
    pub fn into_record(self, now: DateTime<Utc>) -> ProgressRecord {
        ProgressRecord {
            id: Uuid::new_v4().to_string(),
            user_email: self.user_email,
            video_id: self.video_id,
            progress_percentage: self.progress_percentage,
            watch_time: self.watch_time,
            completed: self.completed,
            last_watched: now,
        }
    }

    pub fn as_update(&self, now: DateTime<Utc>) -> ProgressUpdate {
        ProgressUpdate {
            progress_percentage: Some(self.progress_percentage),
            watch_time: Some(self.watch_time),
            completed: Some(self.completed),
            last_watched: Some(now),
        }
    }
}

/// Partial update of a progress record. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressUpdate {
    pub progress_percentage: Option<f64>,
    pub watch_time: Option<i64>,
    pub completed: Option<bool>,
    pub last_watched: Option<DateTime<Utc>>,
}

impl ProgressUpdate {
    pub fn apply(&self, record: &mut ProgressRecord) {
        if let Some(p) = self.progress_percentage {
            record.progress_percentage = p;
        }
        if let Some(w) = self.watch_time {
            record.watch_time = w;
        }
        if let Some(c) = self.completed {
            record.completed = c;
        }
        if let Some(t) = self.last_watched {
            record.last_watched = t;
        }
    }
}

/// Exact-match filter over progress records.
#[derive(Debug, Clone, Default)]
pub struct ProgressFilter {
    pub user_email: Option<String>,
    pub video_id: Option<String>,
}

impl ProgressFilter {
    pub fn user(mut self, user_email: impl Into<String>) -> Self {
        self.user_email = Some(user_email.into());
        self
    }

    pub fn video(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Filter selecting every record of a single (user, video) pair.
    pub fn pair(user_email: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self::default().user(user_email).video(video_id)
    }

    pub fn matches(&self, record: &ProgressRecord) -> bool {
        self.user_email
            .as_deref()
            .map_or(true, |e| record.user_email == e)
            && self.video_id.as_deref().map_or(true, |v| record.video_id == v)
    }
}

/// What a client sees for a (user, video) pair, including pairs never watched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub user_email: String,
    pub video_id: String,
    pub progress_percentage: f64,
    pub watch_time: i64,
    pub completed: bool,
    pub last_watched: Option<DateTime<Utc>>,
}

impl ProgressSnapshot {
    pub fn unwatched(user_email: &str, video_id: &str) -> Self {
        Self {
            user_email: user_email.to_string(),
            video_id: video_id.to_string(),
            progress_percentage: 0.0,
            watch_time: 0,
            completed: false,
            last_watched: None,
        }
    }
}

impl From<ProgressRecord> for ProgressSnapshot {
    fn from(r: ProgressRecord) -> Self {
        Self {
            user_email: r.user_email,
            video_id: r.video_id,
            progress_percentage: r.progress_percentage,
            watch_time: r.watch_time,
            completed: r.completed,
            last_watched: Some(r.last_watched),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone};

    use super::*;

    /// A record whose `last_watched` is `minutes` after a fixed epoch.
    pub fn record(
        user_email: &str,
        video_id: &str,
        watch_time: i64,
        completed: bool,
        minutes: i64,
    ) -> ProgressRecord {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ProgressRecord {
            id: Uuid::new_v4().to_string(),
            user_email: user_email.to_string(),
            video_id: video_id.to_string(),
            progress_percentage: if completed { 100.0 } else { 40.0 },
            watch_time,
            completed,
            last_watched: epoch + Duration::minutes(minutes),
        }
    }
}
