use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::middleware::ClientIp;
use crate::services::inventory::{CreateProductRequest, ProductResponse, SetQuantityRequest};
use crate::{ApiResponse, ApiResult, AppState};

/// List all products, lowest stock first
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses(
        (status = 200, description = "Product list returned"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(State(state): State<AppState>) -> ApiResult<Vec<ProductResponse>> {
    let products = state.services.inventory.list_products().await?;
    Ok(Json(ApiResponse::success(products)))
}

/// Products at or below their minimum level
#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    responses(
        (status = 200, description = "Low stock products returned")
    ),
    tag = "inventory"
)]
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Vec<ProductResponse>> {
    let products = state.services.inventory.low_stock_products().await?;
    Ok(Json(ApiResponse::success(products)))
}

/// Fetch a single product
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product returned"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ProductResponse> {
    let product = state.services.inventory.get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Add a new product to the inventory
#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<ProductResponse> {
    let product = state.services.inventory.create_product(request).await?;

    state
        .services
        .activity_log
        .record(
            "CREATE_PRODUCT",
            &format!("Added product {} ({} {})", product.name, product.quantity, product.unit),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(product)))
}

/// Set a product's quantity (restock or correction)
#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}/quantity",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated"),
        (status = 400, description = "Invalid quantity", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetQuantityRequest>,
) -> ApiResult<ProductResponse> {
    let product = state.services.inventory.set_quantity(id, request).await?;

    state
        .services
        .activity_log
        .record(
            "UPDATE_STOCK",
            &format!(
                "Set {} to {} {}",
                product.name, product.quantity, product.unit
            ),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(product)))
}

/// Remove a product from the inventory
#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Admin role required", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Extension(client_ip): Extension<ClientIp>,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    state.services.inventory.delete_product(id).await?;

    state
        .services
        .activity_log
        .record(
            "DELETE_PRODUCT",
            &format!("Deleted product {}", id),
            &user.display_name,
            client_ip.as_str(),
        )
        .await;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": id }),
    )))
}
