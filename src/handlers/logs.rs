use axum::{extract::State, Json};

use crate::services::activity_log::ActivityLogResponse;
use crate::{ApiResponse, ApiResult, AppState};

/// The 100 most recent audit trail entries
#[utoipa::path(
    get,
    path = "/api/v1/logs",
    responses(
        (status = 200, description = "Activity log returned"),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse)
    ),
    tag = "logs"
)]
pub async fn recent_logs(State(state): State<AppState>) -> ApiResult<Vec<ActivityLogResponse>> {
    let logs = state.services.activity_log.recent_logs().await?;
    Ok(Json(ApiResponse::success(logs)))
}
