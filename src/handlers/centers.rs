use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::middleware::ClientIp;
use crate::services::centers::{
    CenterResponse, ImportCentersRequest, ImportSummary, UpdatePopulationRequest,
};
use crate::{ApiResponse, ApiResult, AppState};

/// List all centers sorted by name
#[utoipa::path(
    get,
    path = "/api/v1/centers",
    responses(
        (status = 200, description = "Center list returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "centers"
)]
pub async fn list_centers(State(state): State<AppState>) -> ApiResult<Vec<CenterResponse>> {
    let centers = state.services.centers.list_centers().await?;
    Ok(Json(ApiResponse::success(centers)))
}

/// Fetch a single center
#[utoipa::path(
    get,
    path = "/api/v1/centers/{id}",
    params(("id" = Uuid, Path, description = "Center id")),
    responses(
        (status = 200, description = "Center returned"),
        (status = 404, description = "Center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "centers"
)]
pub async fn get_center(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CenterResponse> {
    let center = state.services.centers.get_center(id).await?;
    Ok(Json(ApiResponse::success(center)))
}

/// Create or bulk-import centers
#[utoipa::path(
    post,
    path = "/api/v1/centers",
    request_body = ImportCentersRequest,
    responses(
        (status = 200, description = "Centers imported"),
        (status = 400, description = "No usable records", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse)
    ),
    tag = "centers"
)]
pub async fn import_centers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Json(request): Json<ImportCentersRequest>,
) -> ApiResult<ImportSummary> {
    let summary = state.services.centers.import_centers(request).await?;

    state
        .services
        .activity_log
        .record(
            "CREATE_CENTER",
            &format!(
                "Imported {} centers ({} skipped)",
                summary.imported, summary.skipped
            ),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(summary)))
}

/// Update a center's head count; status flips to `full` at capacity
#[utoipa::path(
    post,
    path = "/api/v1/centers/population",
    request_body = UpdatePopulationRequest,
    responses(
        (status = 200, description = "Population updated"),
        (status = 400, description = "Invalid population", body = crate::errors::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "centers"
)]
pub async fn update_population(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Json(request): Json<UpdatePopulationRequest>,
) -> ApiResult<CenterResponse> {
    let center = state.services.centers.update_population(request).await?;

    state
        .services
        .activity_log
        .record(
            "UPDATE_POPULATION",
            &format!(
                "Set {} population to {} ({})",
                center.name, center.population, center.status
            ),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(center)))
}

/// Delete a center
#[utoipa::path(
    delete,
    path = "/api/v1/centers/{id}",
    params(("id" = Uuid, Path, description = "Center id")),
    responses(
        (status = 200, description = "Center deleted"),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "centers"
)]
pub async fn delete_center(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    let name = state.services.centers.delete_center(id).await?;

    state
        .services
        .activity_log
        .record(
            "DELETE_CENTER",
            &format!("Deleted center {}", name),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": name }),
    )))
}
