//! `/api/v1` JSON endpoints.

use actix_web::{HttpRequest, HttpResponse, get, patch, web};

use crate::repository::FleetRepository;
use crate::routes::{json_error, json_ok, list_params, run_blocking};
use crate::services::api as api_service;
use crate::services::ServiceError;
use crate::services::api::DriverStatusPayload;

#[get("/v1/vehicles")]
pub async fn api_v1_vehicles(req: HttpRequest, repo: web::Data<dyn FleetRepository>) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || api_service::list_vehicles(repo.as_ref(), &params)).await {
        Ok(response) => json_ok(&response),
        Err(err) => json_error(err),
    }
}

#[get("/v1/drivers")]
pub async fn api_v1_drivers(req: HttpRequest, repo: web::Data<dyn FleetRepository>) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || api_service::list_drivers(repo.as_ref(), &params)).await {
        Ok(response) => json_ok(&response),
        Err(err) => json_error(err),
    }
}

#[get("/v1/leases")]
pub async fn api_v1_leases(req: HttpRequest, repo: web::Data<dyn FleetRepository>) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || api_service::list_leases(repo.as_ref(), &params)).await {
        Ok(response) => json_ok(&response),
        Err(err) => json_error(err),
    }
}

#[get("/v1/maintenance")]
pub async fn api_v1_maintenance(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || api_service::list_maintenance(repo.as_ref(), &params)).await {
        Ok(response) => json_ok(&response),
        Err(err) => json_error(err),
    }
}

#[get("/v1/audit-logs")]
pub async fn api_v1_audit_logs(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || api_service::list_audit_logs(repo.as_ref(), &params)).await {
        Ok(response) => json_ok(&response),
        Err(err) => json_error(err),
    }
}

/// Sets the status given in the body, or toggles it when the body is empty.
#[patch("/v1/drivers/{driver_id}/status")]
pub async fn api_v1_driver_status(
    driver_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
    body: web::Bytes,
) -> HttpResponse {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        DriverStatusPayload::default()
    } else {
        match serde_json::from_slice::<DriverStatusPayload>(&body) {
            Ok(payload) => payload,
            Err(err) => {
                return json_error(ServiceError::Form(format!(
                    "Malformed request body: {err}"
                )));
            }
        }
    };

    let driver_id = driver_id.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || api_service::update_driver_status(repo.as_ref(), driver_id, payload))
        .await
    {
        Ok(driver) => json_ok(&driver),
        Err(err) => json_error(err),
    }
}
