//! Viewing progress routes.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::progress::{ProgressRecord, ProgressReport, ProgressSnapshot};
use crate::services::tracking;
use crate::AppState;

/// POST /api/video-progress: create or update the caller's progress on a video.
pub async fn report(
    State(state): State<AppState>,
    Json(body): Json<ProgressReport>,
) -> Result<Json<ApiResponse<ProgressRecord>>, AppError> {
    let record = tracking::record_progress(state.store.as_ref(), body).await?;
    Ok(ApiResponse::success(record))
}

/// GET /api/video-progress/:email/:video_id
pub async fn get_for_pair(
    State(state): State<AppState>,
    Path((email, video_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ProgressSnapshot>>, AppError> {
    let snapshot = tracking::get_progress(state.store.as_ref(), &email, &video_id).await?;
    Ok(ApiResponse::success(snapshot))
}
