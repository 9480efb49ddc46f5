//! Category routes.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::category::{Category, CategoryInput, CategoryWithVideos};
use crate::services::catalog;
use crate::AppState;

/// GET /api/categories: every category with its videos (seeds defaults on first use).
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryWithVideos>>>, AppError> {
    let categories = catalog::list_categories(state.store.as_ref()).await?;
    Ok(ApiResponse::success(categories))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CategoryInput>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = catalog::create_category(state.store.as_ref(), body).await?;
    Ok(ApiResponse::success(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CategoryInput>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = catalog::update_category(state.store.as_ref(), &id, &body).await?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/categories/:id: videos of the category are kept.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    catalog::delete_category(state.store.as_ref(), &id).await?;
    Ok(ApiResponse::success("Category deleted"))
}
