//! User management routes.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::user::{CreateUser, UserResponse};
use crate::services::auth as auth_service;
use crate::AppState;

/// GET /api/users: list users without passwords.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let users = auth_service::list_users(state.store.as_ref()).await?;
    Ok(ApiResponse::success(users))
}

/// POST /api/users: create a user (409 when the email is taken).
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth_service::create_user(state.store.as_ref(), body).await?;
    Ok(ApiResponse::success(user))
}

/// DELETE /api/users/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    auth_service::delete_user(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::success("User deleted"))
}
