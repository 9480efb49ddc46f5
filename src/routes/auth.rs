//! Authentication route: plain credential check.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::user::{LoginRequest, LoginResponse};
use crate::services::auth as auth_service;
use crate::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let identity = auth_service::login(state.store.as_ref(), &state.config, &body).await?;
    Ok(ApiResponse::success(identity))
}
