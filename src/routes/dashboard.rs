//! Dashboard route: a learner's aggregated progress.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::services::dashboard::{self, UserDashboard};
use crate::AppState;

/// GET /api/dashboard/:email
pub async fn user_dashboard(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<UserDashboard>>, AppError> {
    let dashboard = dashboard::build_dashboard(state.store.as_ref(), &email).await?;
    Ok(ApiResponse::success(dashboard))
}
