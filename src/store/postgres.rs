//! PostgreSQL record store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryInput};
use crate::models::progress::{ProgressFilter, ProgressRecord, ProgressUpdate};
use crate::models::settings::{BannerVideo, Settings};
use crate::models::user::{User, UserFilter};
use crate::models::video::{Video, VideoFilter, VideoInput};
use crate::store::{RecordStore, StoreResult};

const VIDEO_COLUMNS: &str = "id, title, description, thumbnail, duration, youtube_id, match_label, \
     difficulty, rating, views, release_date, category_id, created_at";

const PROGRESS_COLUMNS: &str =
    "id, user_email, video_id, progress_percentage, watch_time, completed, last_watched";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, created_at FROM categories ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_category(&self, id: &str) -> StoreResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        sqlx::query("INSERT INTO categories (id, name, icon, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.icon)
            .bind(category.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_category(&self, id: &str, input: &CategoryInput) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2, icon = $3 WHERE id = $1")
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_videos(&self, filter: &VideoFilter) -> StoreResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos
             WHERE ($1::text IS NULL OR category_id = $1)
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, Video>(&sql)
            .bind(&filter.category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_video(&self, id: &str) -> StoreResult<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        let row = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_video(&self, video: &Video) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, title, description, thumbnail, duration, youtube_id,
                match_label, difficulty, rating, views, release_date, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail)
        .bind(&video.duration)
        .bind(&video.youtube_id)
        .bind(&video.match_label)
        .bind(&video.difficulty)
        .bind(video.rating)
        .bind(video.views)
        .bind(&video.release_date)
        .bind(&video.category_id)
        .bind(video.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_video(&self, id: &str, input: &VideoInput) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE videos SET
                title = $2, description = $3, thumbnail = $4, duration = $5,
                youtube_id = $6, match_label = $7, difficulty = $8, rating = $9,
                views = $10, release_date = $11, category_id = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.thumbnail)
        .bind(&input.duration)
        .bind(&input.youtube_id)
        .bind(&input.match_label)
        .bind(&input.difficulty)
        .bind(input.rating)
        .bind(input.views)
        .bind(&input.release_date)
        .bind(&input.category_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_video(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_progress(&self, filter: &ProgressFilter) -> StoreResult<Vec<ProgressRecord>> {
        let sql = format!(
            "SELECT {PROGRESS_COLUMNS} FROM video_progress
             WHERE ($1::text IS NULL OR user_email = $1)
               AND ($2::text IS NULL OR video_id = $2)"
        );
        let rows = sqlx::query_as::<_, ProgressRecord>(&sql)
            .bind(&filter.user_email)
            .bind(&filter.video_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_one_progress(
        &self,
        filter: &ProgressFilter,
    ) -> StoreResult<Option<ProgressRecord>> {
        let sql = format!(
            "SELECT {PROGRESS_COLUMNS} FROM video_progress
             WHERE ($1::text IS NULL OR user_email = $1)
               AND ($2::text IS NULL OR video_id = $2)
             ORDER BY last_watched DESC, id COLLATE \"C\" DESC
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, ProgressRecord>(&sql)
            .bind(&filter.user_email)
            .bind(&filter.video_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_progress(&self, record: &ProgressRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO video_progress (id, user_email, video_id, progress_percentage,
                watch_time, completed, last_watched)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_email)
        .bind(&record.video_id)
        .bind(record.progress_percentage)
        .bind(record.watch_time)
        .bind(record.completed)
        .bind(record.last_watched)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_progress(
        &self,
        id: &str,
        update: &ProgressUpdate,
    ) -> StoreResult<Option<ProgressRecord>> {
        let sql = format!(
            "UPDATE video_progress SET
                progress_percentage = COALESCE($2, progress_percentage),
                watch_time = COALESCE($3, watch_time),
                completed = COALESCE($4, completed),
                last_watched = COALESCE($5, last_watched)
             WHERE id = $1
             RETURNING {PROGRESS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProgressRecord>(&sql)
            .bind(id)
            .bind(update.progress_percentage)
            .bind(update.watch_time)
            .bind(update.completed)
            .bind(update.last_watched)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name, role, created_at FROM users
            WHERE ($1::text IS NULL OR id = $1)
              AND ($2::text IS NULL OR email = $2)
              AND ($3::text IS NULL OR password = $3)
            ORDER BY created_at
            "#,
        )
        .bind(&filter.id)
        .bind(&filter.email)
        .bind(&filter.password)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_one_user(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name, role, created_at FROM users
            WHERE ($1::text IS NULL OR id = $1)
              AND ($2::text IS NULL OR email = $2)
              AND ($3::text IS NULL OR password = $3)
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(&filter.id)
        .bind(&filter.email)
        .bind(&filter.password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password, name, role, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_settings(&self) -> StoreResult<Option<Settings>> {
        let row = sqlx::query_as::<_, Settings>(
            r#"
            SELECT id, logo_url, company_name, login_background_url, banner_url,
                login_title, login_subtitle, theme, updated_at
            FROM settings
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (id, logo_url, company_name, login_background_url, banner_url,
                login_title, login_subtitle, theme, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                logo_url = EXCLUDED.logo_url,
                company_name = EXCLUDED.company_name,
                login_background_url = EXCLUDED.login_background_url,
                banner_url = EXCLUDED.banner_url,
                login_title = EXCLUDED.login_title,
                login_subtitle = EXCLUDED.login_subtitle,
                theme = EXCLUDED.theme,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&settings.id)
        .bind(&settings.logo_url)
        .bind(&settings.company_name)
        .bind(&settings.login_background_url)
        .bind(&settings.banner_url)
        .bind(&settings.login_title)
        .bind(&settings.login_subtitle)
        .bind(&settings.theme)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_banner(&self) -> StoreResult<Option<BannerVideo>> {
        let row = sqlx::query_as::<_, BannerVideo>(
            "SELECT id, title, description, thumbnail, youtube_id, created_at
             FROM banner_videos ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn replace_banner(&self, banner: &BannerVideo) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM banner_videos")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO banner_videos (id, title, description, thumbnail, youtube_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&banner.id)
        .bind(&banner.title)
        .bind(&banner.description)
        .bind(&banner.thumbnail)
        .bind(&banner.youtube_id)
        .bind(banner.created_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn clear_banner(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM banner_videos")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
