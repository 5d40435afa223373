use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::services::notifications::{CreateNotificationRequest, NotificationResponse};
use crate::{ApiResponse, ApiResult, AppState};

/// The 20 most recent notifications
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn recent_notifications(
    State(state): State<AppState>,
) -> ApiResult<Vec<NotificationResponse>> {
    let notifications = state.services.notifications.recent_notifications().await?;
    Ok(Json(ApiResponse::success(notifications)))
}

/// Publish a notification
#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 200, description = "Notification created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> ApiResult<NotificationResponse> {
    let notification = state
        .services
        .notifications
        .create_notification(request)
        .await?;
    Ok(Json(ApiResponse::success(notification)))
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked as read"),
        (status = 404, description = "Notification not found", body = crate::errors::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<NotificationResponse> {
    let notification = state.services.notifications.mark_read(id).await?;
    Ok(Json(ApiResponse::success(notification)))
}
