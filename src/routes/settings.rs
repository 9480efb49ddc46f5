//! Site settings and banner video routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::settings::{BannerVideo, BannerVideoInput, Settings, SettingsUpdate};
use crate::services::settings as settings_service;
use crate::AppState;

/// GET /api/settings: creates defaults on first access.
pub async fn get(State(state): State<AppState>) -> Result<Json<ApiResponse<Settings>>, AppError> {
    let settings = settings_service::get_settings(state.store.as_ref()).await?;
    Ok(ApiResponse::success(settings))
}

/// PUT /api/settings: partial update; absent fields are kept.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<SettingsUpdate>,
) -> Result<Json<ApiResponse<Settings>>, AppError> {
    let settings = settings_service::update_settings(state.store.as_ref(), &body).await?;
    Ok(ApiResponse::success(settings))
}

/// GET /api/banner-video: `data` is null when no banner is set.
pub async fn get_banner(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<BannerVideo>>>, AppError> {
    let banner = settings_service::get_banner(state.store.as_ref()).await?;
    Ok(ApiResponse::success(banner))
}

/// POST /api/banner-video: replaces any existing banner.
pub async fn set_banner(
    State(state): State<AppState>,
    Json(body): Json<BannerVideoInput>,
) -> Result<Json<ApiResponse<BannerVideo>>, AppError> {
    let banner = settings_service::set_banner(state.store.as_ref(), body).await?;
    Ok(ApiResponse::success(banner))
}

/// DELETE /api/banner-video
pub async fn clear_banner(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    settings_service::clear_banner(state.store.as_ref()).await?;
    Ok(ApiResponse::success("Banner video removed"))
}
