mod common;

use axum::http::{Method, StatusCode};
use common::{json_body, TestApp};
use serde_json::json;
use shelter_api::services::inventory::CreateProductRequest;

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/transfers",
        "/api/v1/inventory",
        "/api/v1/centers",
        "/api/v1/beneficiaries",
        "/api/v1/notifications",
        "/api/v1/logs",
        "/api/v1/dashboard",
    ] {
        let response = app.request(Method::GET, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/inventory", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_cannot_reach_admin_routes() {
    let app = TestApp::new().await;

    let admin_only = [
        (Method::GET, "/api/v1/logs"),
        (Method::GET, "/api/v1/dashboard"),
        (Method::POST, "/api/v1/centers"),
        (Method::POST, "/api/v1/inventory"),
    ];
    for (method, uri) in admin_only {
        let response = app.request_as_staff(method, uri, None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {}", uri);
    }
}

#[tokio::test]
async fn staff_cannot_decide_transfers() {
    let app = TestApp::new().await;

    // Any id will do: the role gate runs before the lookup
    let uri = format!(
        "/api/v1/transfers/{}/approve",
        uuid::Uuid::new_v4()
    );
    let response = app.request_as_staff(Method::POST, &uri, None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn staff_can_use_operational_routes() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/transfers",
        "/api/v1/inventory",
        "/api/v1/inventory/low-stock",
        "/api/v1/centers",
        "/api/v1/beneficiaries",
        "/api/v1/notifications",
    ] {
        let response = app.request_as_staff(Method::GET, uri, None).await;
        let body = json_body(response, StatusCode::OK).await;
        assert_eq!(body["success"], json!(true), "uri: {}", uri);
    }
}

#[tokio::test]
async fn admin_satisfies_every_route() {
    let app = TestApp::new().await;

    for uri in ["/api/v1/inventory", "/api/v1/logs", "/api/v1/dashboard"] {
        let response = app.request_as_admin(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
    }
}

#[tokio::test]
async fn login_returns_a_usable_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "username": "staff", "password": "staff-password" })),
            None,
        )
        .await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["token_type"], json!("Bearer"));
    assert_eq!(body["role"], json!("staff"));
    assert_eq!(body["display_name"], json!("Field Staff"));

    let token = body["access_token"].as_str().unwrap().to_string();
    let response = app
        .request(Method::GET, "/api/v1/inventory", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "username": "staff", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "username": "nobody", "password": "whatever" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn error_payloads_carry_the_request_id() {
    let app = TestApp::new().await;

    let uri = format!("/api/v1/inventory/{}", uuid::Uuid::new_v4());
    let response = app.request_as_staff(Method::GET, &uri, None).await;

    let header_id = response
        .headers()
        .get("x-request-id")
        .expect("request id header present")
        .to_str()
        .unwrap()
        .to_string();

    let body = json_body(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body["error"], json!("Not Found"));
    assert_eq!(body["request_id"], json!(header_id));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn success_envelope_carries_meta_and_request_id() {
    let app = TestApp::new().await;
    app.state
        .services
        .inventory
        .create_product(CreateProductRequest {
            name: "Rice".to_string(),
            category: None,
            quantity: 50,
            unit: "sack".to_string(),
            min_level: None,
            location: None,
        })
        .await
        .unwrap();

    let response = app.request_as_staff(Method::GET, "/api/v1/inventory", None).await;
    let header_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["name"], json!("Rice"));
    assert_eq!(body["meta"]["request_id"], json!(header_id));
}

#[tokio::test]
async fn status_and_health_respond_without_auth() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/status", None, None).await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["service"], json!("shelter-api"));

    let response = app.request(Method::GET, "/api/v1/health", None, None).await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["data"]["checks"]["database"], json!("healthy"));
}

#[tokio::test]
async fn admin_mutations_land_in_the_audit_trail() {
    let app = TestApp::new().await;

    let response = app
        .request_as_admin(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({
                "name": "Blankets",
                "quantity": 40,
                "unit": "piece"
            })),
        )
        .await;
    json_body(response, StatusCode::OK).await;

    let response = app.request_as_admin(Method::GET, "/api/v1/logs", None).await;
    let body = json_body(response, StatusCode::OK).await;
    let logs = body["data"].as_array().unwrap();
    assert!(logs.iter().any(|log| {
        log["action"] == json!("CREATE_PRODUCT") && log["actor"] == json!("Relief Admin")
    }));
}
