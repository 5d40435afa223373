//! Shelter API Library
//!
//! Core functionality for the emergency shelter management API: shelter
//! centers, beneficiary registration, relief supply inventory, and the
//! transfer request workflow.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::{AuthRouterExt, Role};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

// Common response wrapper
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Versioned API routes with role gating.
///
/// Staff and admins share the operational surface (registration, stock
/// lookups, opening transfer requests); decisions on transfers, center and
/// inventory management, the audit trail, and the dashboard are admin-only.
pub fn api_v1_routes() -> Router<AppState> {
    // Routes any authenticated operator can use
    let operational = Router::new()
        .route(
            "/transfers",
            get(handlers::transfers::list_transfers).post(handlers::transfers::create_transfer),
        )
        .route("/transfers/:id", get(handlers::transfers::get_transfer))
        .route("/inventory", get(handlers::inventory::list_inventory))
        .route("/inventory/low-stock", get(handlers::inventory::low_stock))
        .route("/inventory/:id", get(handlers::inventory::get_product))
        .route("/centers", get(handlers::centers::list_centers))
        .route(
            "/centers/population",
            axum::routing::post(handlers::centers::update_population),
        )
        .route("/centers/:id", get(handlers::centers::get_center))
        .route(
            "/beneficiaries",
            get(handlers::beneficiaries::list_beneficiaries)
                .post(handlers::beneficiaries::register_beneficiary),
        )
        .route(
            "/notifications",
            get(handlers::notifications::recent_notifications)
                .post(handlers::notifications::create_notification),
        )
        .route(
            "/notifications/:id/read",
            axum::routing::post(handlers::notifications::mark_read),
        )
        .with_role(Role::Staff);

    // Transfer decisions are admin-only
    let transfer_decisions = Router::new()
        .route(
            "/transfers/:id/approve",
            axum::routing::post(handlers::transfers::approve_transfer),
        )
        .route(
            "/transfers/:id/reject",
            axum::routing::post(handlers::transfers::reject_transfer),
        )
        .route(
            "/transfers/:id/cancel",
            axum::routing::post(handlers::transfers::cancel_transfer),
        )
        .with_role(Role::Admin);

    // Center and inventory management
    let administration = Router::new()
        .route(
            "/centers",
            axum::routing::post(handlers::centers::import_centers),
        )
        .route(
            "/centers/:id",
            axum::routing::delete(handlers::centers::delete_center),
        )
        .route(
            "/inventory",
            axum::routing::post(handlers::inventory::create_product),
        )
        .route(
            "/inventory/:id/quantity",
            axum::routing::put(handlers::inventory::set_quantity),
        )
        .route(
            "/inventory/:id",
            axum::routing::delete(handlers::inventory::delete_product),
        )
        .route(
            "/beneficiaries/:id",
            axum::routing::delete(handlers::beneficiaries::delete_beneficiary),
        )
        .route("/logs", get(handlers::logs::recent_logs))
        .route("/dashboard", get(handlers::dashboard::overview))
        .with_role(Role::Admin);

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(operational)
        .merge(transfer_decisions)
        .merge(administration)
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let version = env!("CARGO_PKG_VERSION");
    let status_data = json!({
        "status": "ok",
        "version": version,
        "service": "shelter-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}
