use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::middleware::ClientIp;
use crate::services::transfers::{CreateTransferRequest, TransferListQuery, TransferResponse};
use crate::{ApiResponse, ApiResult, AppState};

/// List transfer requests, newest first
#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    params(TransferListQuery),
    responses(
        (status = 200, description = "Transfer list returned"),
        (status = 400, description = "Unknown status filter", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<TransferListQuery>,
) -> ApiResult<Vec<TransferResponse>> {
    let transfers = state.services.transfers.list_transfers(query).await?;
    Ok(Json(ApiResponse::success(transfers)))
}

/// Fetch a single transfer request with its items
#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    params(("id" = Uuid, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer returned"),
        (status = 404, description = "Transfer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<TransferResponse> {
    let transfer = state.services.transfers.get_transfer(id).await?;
    Ok(Json(ApiResponse::success(transfer)))
}

/// Open a new transfer request
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Center or product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Json(request): Json<CreateTransferRequest>,
) -> ApiResult<TransferResponse> {
    let transfer = state
        .services
        .transfers
        .create_transfer(request, &user.display_name)
        .await?;

    state
        .services
        .activity_log
        .record(
            "CREATE_TRANSFER",
            &format!(
                "Opened transfer {} for {}",
                transfer.doc_no, transfer.destination_name
            ),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(transfer)))
}

/// Approve a pending transfer and deduct stock
#[utoipa::path(
    post,
    path = "/api/v1/transfers/{id}/approve",
    params(("id" = Uuid, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer approved"),
        (status = 400, description = "Transfer is not pending", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn approve_transfer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<TransferResponse> {
    let transfer = state
        .services
        .transfers
        .approve_transfer(id, &user.display_name)
        .await?;

    state
        .services
        .activity_log
        .record(
            "APPROVE_TRANSFER",
            &format!("Approved transfer {} and deducted stock", transfer.doc_no),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(transfer)))
}

/// Reject a pending transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfers/{id}/reject",
    params(("id" = Uuid, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer rejected"),
        (status = 400, description = "Transfer is not pending", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn reject_transfer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<TransferResponse> {
    let transfer = state
        .services
        .transfers
        .reject_transfer(id, &user.display_name)
        .await?;

    state
        .services
        .activity_log
        .record(
            "REJECT_TRANSFER",
            &format!("Rejected transfer {}", transfer.doc_no),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(transfer)))
}

/// Cancel an approved transfer and return stock
#[utoipa::path(
    post,
    path = "/api/v1/transfers/{id}/cancel",
    params(("id" = Uuid, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer cancelled and stock returned"),
        (status = 400, description = "Transfer is not approved", body = crate::errors::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse)
    ),
    tag = "transfers"
)]
pub async fn cancel_transfer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<TransferResponse> {
    let transfer = state.services.transfers.cancel_transfer(id).await?;

    state
        .services
        .activity_log
        .record(
            "CANCEL_TRANSFER",
            &format!("Cancelled transfer {} and returned stock", transfer.doc_no),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(transfer)))
}
