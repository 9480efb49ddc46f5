//! Admin statistics route.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::services::admin_stats::{self, AdminReport};
use crate::AppState;

/// GET /api/admin/stats: platform-wide rollup.
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdminReport>>, AppError> {
    let report = admin_stats::build_admin_report(state.store.as_ref()).await?;
    Ok(ApiResponse::success(report))
}
