use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use pushkind_fleet::domain::types::DriverId;
use pushkind_fleet::read_model::VehicleReadModel;
use pushkind_fleet::repository::memory::MemoryRepository;
use pushkind_fleet::repository::mock_data::{MOCK_DRIVERS, MOCK_VEHICLES};
use pushkind_fleet::repository::{DriverReader, FleetRepository};
use pushkind_fleet::routes::api::{
    api_v1_audit_logs, api_v1_driver_status, api_v1_drivers, api_v1_vehicles,
};
use pushkind_fleet::routes::audit_logs::{export_audit_logs, show_audit_logs};
use pushkind_fleet::routes::drivers::{export_drivers, show_drivers};
use pushkind_fleet::routes::main::show_index;
use pushkind_fleet::routes::vehicles::show_vehicles;
use serde_json::Value;
use tera::Tera;

fn mock_repo() -> Arc<MemoryRepository> {
    Arc::new(MemoryRepository::with_mock_data().unwrap())
}

macro_rules! test_app {
    ($repo:expr) => {{
        let repo: Arc<dyn FleetRepository> = $repo;
        let tera = Tera::new("templates/**/*").unwrap();
        let store = CookieMessageStore::builder(Key::generate()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(store).build())
                .app_data(web::Data::from(repo))
                .app_data(web::Data::new(VehicleReadModel::new()))
                .app_data(web::Data::new(tera))
                .service(
                    web::scope("/api")
                        .service(api_v1_vehicles)
                        .service(api_v1_drivers)
                        .service(api_v1_driver_status)
                        .service(api_v1_audit_logs),
                )
                .service(show_index)
                .service(show_vehicles)
                .service(export_drivers)
                .service(show_drivers)
                .service(export_audit_logs)
                .service(show_audit_logs),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_vehicle_list_json_carries_page_and_stats() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get()
        .uri("/api/v1/vehicles?per_page=10&page=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], MOCK_VEHICLES);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["total_pages"], 4);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["stats"]["total"], MOCK_VEHICLES);
}

#[actix_web::test]
async fn test_critical_audit_logs_are_paged() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get()
        .uri("/api/v1/audit-logs?status=critical&per_page=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 20);
    assert_eq!(body["total_pages"], 2);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|log| log["level"] == "critical"));
}

#[actix_web::test]
async fn test_driver_list_without_stats() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get().uri("/api/v1/drivers").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], MOCK_DRIVERS);
    assert!(body.get("stats").is_none());
}

#[actix_web::test]
async fn test_invalid_filters_are_rejected() {
    let app = test_app!(mock_repo());

    for uri in [
        "/api/v1/vehicles?status=flying",
        "/api/v1/vehicles?per_page=7",
        "/api/v1/audit-logs?from=2025-02-01&to=2025-01-01",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "validation");
    }
}

#[actix_web::test]
async fn test_patch_driver_status_toggles_and_sets() {
    let repo = mock_repo();
    let before = repo
        .get_driver_by_id(DriverId::new(1).unwrap())
        .unwrap()
        .unwrap()
        .status;
    let app = test_app!(repo.clone());

    let req = test::TestRequest::patch()
        .uri("/api/v1/drivers/1/status")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], before.toggled().to_string());

    let req = test::TestRequest::patch()
        .uri("/api/v1/drivers/1/status")
        .set_json(serde_json::json!({ "status": "inactive" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "inactive");
}

#[actix_web::test]
async fn test_patch_driver_status_errors() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::patch()
        .uri("/api/v1/drivers/1/status")
        .set_json(serde_json::json!({ "status": "on_leave" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri("/api/v1/drivers/1/status")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri("/api/v1/drivers/9999/status")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "not_found");
}

#[actix_web::test]
async fn test_driver_export_is_a_csv_attachment() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get()
        .uri("/drivers/export?status=active")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("drivers_"));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.starts_with("id,full_name,email,phone,license_number"));
    assert!(text.lines().skip(1).all(|line| line.contains(",active,")));
}

#[actix_web::test]
async fn test_audit_log_export_formats() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get()
        .uri("/audit-logs/export?status=critical&format=json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 20);

    // Unknown formats bounce back to the list with a flash message.
    let req = test::TestRequest::get()
        .uri("/audit-logs/export?format=xml")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/audit-logs"
    );
}

#[actix_web::test]
async fn test_html_pages_render() {
    let app = test_app!(mock_repo());

    for (uri, marker) in [
        ("/", "Fleet overview"),
        ("/vehicles?status=available", "Vehicles"),
        ("/drivers", "Drivers"),
        ("/audit-logs?status=critical", "Audit logs"),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(marker), "{uri}");
    }
}

#[actix_web::test]
async fn test_list_page_shows_retry_on_bad_filter() {
    let app = test_app!(mock_repo());

    let req = test::TestRequest::get()
        .uri("/vehicles?status=flying")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Retry"));
}

#[actix_web::test]
async fn test_pages_past_the_end_are_empty() {
    let app = test_app!(mock_repo());

    let huge = usize::MAX;
    for uri in [
        "/api/v1/vehicles?per_page=10&page=5".to_string(),
        format!("/api/v1/vehicles?per_page=10&page={huge}"),
        format!("/api/v1/audit-logs?status=critical&per_page=10&page={huge}"),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["items"].as_array().unwrap().is_empty(), "{uri}");
        assert!(body["total"].as_u64().unwrap() > 0, "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/vehicles?per_page=10&page=4")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().unwrap().len(), MOCK_VEHICLES - 30);
}

#[actix_web::test]
async fn test_html_lists_render_huge_page_numbers() {
    let app = test_app!(mock_repo());

    let huge = usize::MAX;
    for uri in [
        format!("/vehicles?page={huge}"),
        format!("/drivers?page={huge}"),
        format!("/audit-logs?page={huge}&per_page=100"),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}
