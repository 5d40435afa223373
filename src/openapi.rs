use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelter API",
        version = "0.3.0",
        description = r#"
# Emergency Shelter Management API

Backend for coordinating emergency shelters: shelter centers, beneficiary
registration, relief supply inventory, and inter-center transfer requests.

## Authentication

All endpoints except `/auth/login` and the health probes require a JWT:

```
Authorization: Bearer <token>
```

Admins can approve, reject, and cancel transfer requests and manage
centers; staff handle day-to-day registration and stock updates.

## Error Handling

Errors share one JSON shape with appropriate HTTP status codes:

```json
{
  "error": "Unprocessable Entity",
  "message": "Insufficient stock: Rice (have 2, requested 5)",
  "request_id": "3f9c...",
  "timestamp": "2026-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "transfers", description = "Transfer request workflow"),
        (name = "inventory", description = "Relief supply inventory"),
        (name = "centers", description = "Shelter centers"),
        (name = "beneficiaries", description = "Beneficiary registration"),
        (name = "notifications", description = "In-app notifications"),
        (name = "logs", description = "Audit trail"),
        (name = "dashboard", description = "Overview aggregates")
    ),
    paths(
        crate::handlers::transfers::list_transfers,
        crate::handlers::transfers::get_transfer,
        crate::handlers::transfers::create_transfer,
        crate::handlers::transfers::approve_transfer,
        crate::handlers::transfers::reject_transfer,
        crate::handlers::transfers::cancel_transfer,

        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::low_stock,
        crate::handlers::inventory::get_product,
        crate::handlers::inventory::create_product,
        crate::handlers::inventory::set_quantity,
        crate::handlers::inventory::delete_product,

        crate::handlers::centers::list_centers,
        crate::handlers::centers::get_center,
        crate::handlers::centers::import_centers,
        crate::handlers::centers::update_population,
        crate::handlers::centers::delete_center,

        crate::handlers::beneficiaries::list_beneficiaries,
        crate::handlers::beneficiaries::register_beneficiary,
        crate::handlers::beneficiaries::delete_beneficiary,

        crate::handlers::notifications::recent_notifications,
        crate::handlers::notifications::create_notification,
        crate::handlers::notifications::mark_read,

        crate::handlers::logs::recent_logs,
        crate::handlers::dashboard::overview,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,

            crate::services::transfers::CreateTransferRequest,
            crate::services::transfers::TransferItemRequest,
            crate::services::transfers::TransferItemResponse,
            crate::services::transfers::TransferResponse,

            crate::services::inventory::CreateProductRequest,
            crate::services::inventory::SetQuantityRequest,
            crate::services::inventory::ProductResponse,

            crate::services::centers::ImportCentersRequest,
            crate::services::centers::ImportCenterRecord,
            crate::services::centers::UpdatePopulationRequest,
            crate::services::centers::ImportSummary,
            crate::services::centers::CenterResponse,

            crate::services::beneficiaries::RegisterBeneficiaryRequest,
            crate::services::beneficiaries::BeneficiaryResponse,

            crate::services::notifications::CreateNotificationRequest,
            crate::services::notifications::NotificationResponse,

            crate::services::activity_log::ActivityLogResponse,
            crate::services::dashboard::DashboardResponse,
            crate::services::dashboard::DashboardStats,
            crate::services::dashboard::TopCenter,
            crate::services::dashboard::ChartData,
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/v1/transfers"));
        assert!(json.contains("Shelter API"));
    }
}
