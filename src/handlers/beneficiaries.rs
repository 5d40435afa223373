use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::middleware::ClientIp;
use crate::services::beneficiaries::{BeneficiaryResponse, RegisterBeneficiaryRequest};
use crate::{ApiResponse, ApiResult, AppState};

/// List beneficiaries, most recently registered first
#[utoipa::path(
    get,
    path = "/api/v1/beneficiaries",
    responses(
        (status = 200, description = "Beneficiary list returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "beneficiaries"
)]
pub async fn list_beneficiaries(
    State(state): State<AppState>,
) -> ApiResult<Vec<BeneficiaryResponse>> {
    let people = state.services.beneficiaries.list_beneficiaries().await?;
    Ok(Json(ApiResponse::success(people)))
}

/// Register a new beneficiary
#[utoipa::path(
    post,
    path = "/api/v1/beneficiaries",
    request_body = RegisterBeneficiaryRequest,
    responses(
        (status = 200, description = "Beneficiary registered"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::errors::ErrorResponse)
    ),
    tag = "beneficiaries"
)]
pub async fn register_beneficiary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Json(request): Json<RegisterBeneficiaryRequest>,
) -> ApiResult<BeneficiaryResponse> {
    let person = state
        .services
        .beneficiaries
        .register_beneficiary(request)
        .await?;

    state
        .services
        .activity_log
        .record(
            "REGISTER_BENEFICIARY",
            &format!("Registered {} {}", person.first_name, person.last_name),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(person)))
}

/// Remove a beneficiary record
#[utoipa::path(
    delete,
    path = "/api/v1/beneficiaries/{id}",
    params(("id" = Uuid, Path, description = "Beneficiary id")),
    responses(
        (status = 200, description = "Beneficiary deleted"),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Beneficiary not found", body = crate::errors::ErrorResponse)
    ),
    tag = "beneficiaries"
)]
pub async fn delete_beneficiary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    state.services.beneficiaries.delete_beneficiary(id).await?;

    state
        .services
        .activity_log
        .record(
            "DELETE_BENEFICIARY",
            &format!("Deleted beneficiary {}", id),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": id }),
    )))
}
