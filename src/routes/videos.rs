//! Video routes, including per-video statistics.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::video::{Video, VideoInput};
use crate::services::catalog;
use crate::services::progress::{self, VideoStats, VideoWithStats};
use crate::AppState;

/// GET /api/videos
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Video>>>, AppError> {
    let videos = catalog::list_videos(state.store.as_ref()).await?;
    Ok(ApiResponse::success(videos))
}

/// POST /api/videos
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<VideoInput>,
) -> Result<Json<ApiResponse<Video>>, AppError> {
    let video = catalog::create_video(state.store.as_ref(), body).await?;
    Ok(ApiResponse::success(video))
}

/// PUT /api/videos/:id: full replacement of the editable fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<VideoInput>,
) -> Result<Json<ApiResponse<Video>>, AppError> {
    let video = catalog::update_video(state.store.as_ref(), &id, &body).await?;
    Ok(ApiResponse::success(video))
}

/// DELETE /api/videos/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    catalog::delete_video(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::success("Video deleted"))
}

/// GET /api/videos/:id/detailed: the video plus its statistics.
pub async fn detailed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VideoWithStats>>, AppError> {
    let detail = catalog::video_detail(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::success(detail))
}

/// GET /api/videos/:id/stats: statistics only; unknown ids yield zeroes.
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VideoStats>>, AppError> {
    let stats = progress::compute_video_stats(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::success(stats))
}
