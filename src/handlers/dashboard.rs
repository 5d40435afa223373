use axum::{extract::State, Json};

use crate::services::dashboard::DashboardResponse;
use crate::{ApiResponse, ApiResult, AppState};

/// Aggregates for the overview screen
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn overview(State(state): State<AppState>) -> ApiResult<DashboardResponse> {
    let dashboard = state.services.dashboard.overview().await?;
    Ok(Json(ApiResponse::success(dashboard)))
}
