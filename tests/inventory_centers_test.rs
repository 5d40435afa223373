mod common;

use axum::http::{Method, StatusCode};
use common::{json_body, TestApp};
use serde_json::json;
use shelter_api::errors::ServiceError;
use shelter_api::services::centers::{
    ImportCenterRecord, ImportCentersRequest, PhoneNumbers, UpdatePopulationRequest,
};
use shelter_api::services::inventory::{CreateProductRequest, SetQuantityRequest};
use uuid::Uuid;

fn center_record(name: &str, population: i32, capacity: i32) -> ImportCenterRecord {
    ImportCenterRecord {
        name: Some(name.to_string()),
        location: Some("Riverside district".to_string()),
        subdistrict: None,
        district: None,
        shelter_type: None,
        status: Some("active".to_string()),
        phone_numbers: PhoneNumbers::None,
        population: Some(population),
        capacity: Some(capacity),
    }
}

async fn seed_center(app: &TestApp, name: &str, population: i32, capacity: i32) -> Uuid {
    app.state
        .services
        .centers
        .import_centers(ImportCentersRequest::Single(center_record(
            name, population, capacity,
        )))
        .await
        .expect("seed center");
    app.state
        .services
        .centers
        .list_centers()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .expect("seeded center present")
        .id
}

fn product_request(name: &str, quantity: i32, min_level: i32) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        category: Some("food".to_string()),
        quantity,
        unit: "box".to_string(),
        min_level: Some(min_level),
        location: Some("Warehouse A".to_string()),
    }
}

#[tokio::test]
async fn dropping_to_the_minimum_level_raises_a_stock_notification() {
    let app = TestApp::new().await;
    let product = app
        .state
        .services
        .inventory
        .create_product(product_request("Rice", 50, 10))
        .await
        .unwrap();

    let updated = app
        .state
        .services
        .inventory
        .set_quantity(product.id, SetQuantityRequest { quantity: 10 })
        .await
        .unwrap();
    assert!(updated.low_stock);

    let notifications = app
        .state
        .services
        .notifications
        .recent_notifications()
        .await
        .unwrap();
    let stock = notifications
        .iter()
        .find(|n| n.kind == "stock")
        .expect("stock notification raised");
    assert!(stock.title.contains("Rice"));
    assert!(stock.message.contains("minimum level 10"));
}

#[tokio::test]
async fn staying_above_the_minimum_raises_no_notification() {
    let app = TestApp::new().await;
    let product = app
        .state
        .services
        .inventory
        .create_product(product_request("Rice", 50, 10))
        .await
        .unwrap();

    let updated = app
        .state
        .services
        .inventory
        .set_quantity(product.id, SetQuantityRequest { quantity: 11 })
        .await
        .unwrap();
    assert!(!updated.low_stock);

    let notifications = app
        .state
        .services
        .notifications
        .recent_notifications()
        .await
        .unwrap();
    assert!(notifications.iter().all(|n| n.kind != "stock"));
}

#[tokio::test]
async fn negative_quantities_are_rejected() {
    let app = TestApp::new().await;
    let product = app
        .state
        .services
        .inventory
        .create_product(product_request("Rice", 50, 10))
        .await
        .unwrap();

    let err = app
        .state
        .services
        .inventory
        .set_quantity(product.id, SetQuantityRequest { quantity: -1 })
        .await
        .expect_err("negative quantity must be rejected");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn low_stock_listing_returns_only_products_at_or_below_minimum() {
    let app = TestApp::new().await;
    let services = &app.state.services.inventory;
    services
        .create_product(product_request("Rice", 50, 10))
        .await
        .unwrap();
    services
        .create_product(product_request("Water", 10, 10))
        .await
        .unwrap();
    services
        .create_product(product_request("Blankets", 2, 10))
        .await
        .unwrap();

    let low = services.low_stock_products().await.unwrap();
    let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Blankets", "Water"]);
}

#[tokio::test]
async fn product_listing_surfaces_shortages_first() {
    let app = TestApp::new().await;
    let services = &app.state.services.inventory;
    services
        .create_product(product_request("Rice", 50, 10))
        .await
        .unwrap();
    services
        .create_product(product_request("Blankets", 2, 10))
        .await
        .unwrap();

    let all = services.list_products().await.unwrap();
    assert_eq!(all[0].name, "Blankets");
    assert_eq!(all[1].name, "Rice");
}

#[tokio::test]
async fn import_skips_unnamed_records_and_reports_the_split() {
    let app = TestApp::new().await;
    let records = vec![
        center_record("North School", 0, 100),
        ImportCenterRecord {
            name: None,
            ..center_record("ignored", 0, 0)
        },
        center_record("South Hall", 0, 100),
    ];

    let summary = app
        .state
        .services
        .centers
        .import_centers(ImportCentersRequest::List(records))
        .await
        .unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);

    let centers = app.state.services.centers.list_centers().await.unwrap();
    let names: Vec<&str> = centers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["North School", "South Hall"]);
}

#[tokio::test]
async fn import_with_nothing_usable_is_an_error() {
    let app = TestApp::new().await;
    let err = app
        .state
        .services
        .centers
        .import_centers(ImportCentersRequest::List(vec![ImportCenterRecord {
            name: Some("   ".to_string()),
            ..center_record("ignored", 0, 0)
        }]))
        .await
        .expect_err("payload without usable records must fail");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn population_updates_flip_the_status_at_capacity() {
    let app = TestApp::new().await;
    let center = seed_center(&app, "North School", 50, 100).await;

    let full = app
        .state
        .services
        .centers
        .update_population(UpdatePopulationRequest {
            center_id: center,
            population: 100,
        })
        .await
        .unwrap();
    assert_eq!(full.status, "full");
    assert_eq!(full.population, 100);

    let active = app
        .state
        .services
        .centers
        .update_population(UpdatePopulationRequest {
            center_id: center,
            population: 80,
        })
        .await
        .unwrap();
    assert_eq!(active.status, "active");

    let err = app
        .state
        .services
        .centers
        .update_population(UpdatePopulationRequest {
            center_id: center,
            population: -5,
        })
        .await
        .expect_err("negative population must be rejected");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn beneficiary_registration_copies_the_center_name() {
    let app = TestApp::new().await;
    let center = seed_center(&app, "North School", 50, 100).await;

    let response = app
        .request_as_staff(
            Method::POST,
            "/api/v1/beneficiaries",
            Some(json!({
                "first_name": "Mona",
                "last_name": "Hale",
                "age": 34,
                "center_id": center
            })),
        )
        .await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["data"]["center_name"], json!("North School"));
    assert_eq!(body["data"]["gender"], json!("unspecified"));
    assert_eq!(body["data"]["status"], json!("normal"));

    // Unknown center fails the registration
    let response = app
        .request_as_staff(
            Method::POST,
            "/api/v1/beneficiaries",
            Some(json!({
                "first_name": "Omar",
                "last_name": "Reed",
                "age": 40,
                "center_id": Uuid::new_v4()
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn beneficiaries_list_newest_first() {
    let app = TestApp::new().await;
    for name in ["First", "Second", "Third"] {
        let response = app
            .request_as_staff(
                Method::POST,
                "/api/v1/beneficiaries",
                Some(json!({
                    "first_name": name,
                    "last_name": "Person",
                    "age": 30
                })),
            )
            .await;
        json_body(response, StatusCode::OK).await;
        // Sub-millisecond inserts can share a timestamp; keep the order observable.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed = app
        .state
        .services
        .beneficiaries
        .list_beneficiaries()
        .await
        .unwrap();
    let names: Vec<&str> = listed.iter().map(|b| b.first_name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn dashboard_counts_reflect_center_and_transfer_state() {
    let app = TestApp::new().await;
    let north = seed_center(&app, "North School", 80, 100).await;
    seed_center(&app, "South Hall", 40, 100).await;

    // An inactive center must not count as active nor lose its population
    app.state
        .services
        .centers
        .import_centers(ImportCentersRequest::Single(ImportCenterRecord {
            status: Some("closed".to_string()),
            ..center_record("East Gym", 30, 100)
        }))
        .await
        .unwrap();

    let rice = app
        .state
        .services
        .inventory
        .create_product(product_request("Rice", 100, 10))
        .await
        .unwrap();

    use shelter_api::services::transfers::{CreateTransferRequest, TransferItemRequest};
    let request = |qty: i32| CreateTransferRequest {
        destination_center_id: north,
        items: vec![TransferItemRequest {
            product_id: rice.id,
            quantity: qty,
        }],
    };

    let first = app
        .state
        .services
        .transfers
        .create_transfer(request(5), "Field Staff")
        .await
        .unwrap();
    app.state
        .services
        .transfers
        .create_transfer(request(5), "Field Staff")
        .await
        .unwrap();
    app.state
        .services
        .transfers
        .approve_transfer(first.id, "Relief Admin")
        .await
        .unwrap();

    let response = app.request_as_admin(Method::GET, "/api/v1/dashboard", None).await;
    let body = json_body(response, StatusCode::OK).await;
    let stats = &body["data"]["stats"];
    assert_eq!(stats["centers"], json!(2));
    assert_eq!(stats["population"], json!(150));
    assert_eq!(stats["pending"], json!(1));
    assert_eq!(stats["completed"], json!(1));

    assert_eq!(body["data"]["chart_data"]["total"], json!(2));

    let top = body["data"]["top_centers"].as_array().unwrap();
    assert_eq!(top[0]["name"], json!("North School"));
    assert_eq!(top[0]["count"], json!(2));
    assert_eq!(top[0]["total_items"], json!(2));
}

#[tokio::test]
async fn notifications_cap_at_twenty_and_mark_read_sticks() {
    let app = TestApp::new().await;
    use shelter_api::services::notifications::CreateNotificationRequest;

    let mut last_id = None;
    for i in 0..25 {
        let saved = app
            .state
            .services
            .notifications
            .create_notification(CreateNotificationRequest {
                kind: "info".to_string(),
                title: format!("Update {}", i),
                message: "routine".to_string(),
            })
            .await
            .unwrap();
        last_id = Some(saved.id);
    }

    let recent = app
        .state
        .services
        .notifications
        .recent_notifications()
        .await
        .unwrap();
    assert_eq!(recent.len(), 20);

    let marked = app
        .state
        .services
        .notifications
        .mark_read(last_id.unwrap())
        .await
        .unwrap();
    assert!(marked.read);
}
