use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::leases::LeasesPageData;
use crate::forms::StatusForm;
use crate::forms::leases::AddLeaseForm;
use crate::read_model::VehicleReadModel;
use crate::repository::FleetRepository;
use crate::routes::{
    action_failed, base_context, insert_load_error, list_params, redirect, render_template,
    run_blocking,
};
use crate::services::leases as leases_service;

#[get("/leases")]
pub async fn show_leases(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
    read_model: web::Data<VehicleReadModel>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = list_params(&req);
    let repo = repo.into_inner();
    let read_model = read_model.into_inner();
    let result = run_blocking(move || {
        leases_service::load_leases_page(repo.as_ref(), &read_model, &params)
    })
    .await;

    let mut context = base_context(&flash_messages, "leases");
    let data = result.unwrap_or_else(|err| {
        log::error!("Failed to load leases: {err}");
        insert_load_error(&mut context, &req, &err);
        LeasesPageData::empty()
    });
    context.insert("list", &data.list);
    context.insert("vehicles", &data.vehicles);
    context.insert("drivers", &data.drivers);
    context.insert("lease_statuses", &data.lease_statuses);

    render_template(&tera, "leases/index.html", &context)
}

#[post("/leases/add")]
pub async fn add_lease(
    repo: web::Data<dyn FleetRepository>,
    web::Form(form): web::Form<AddLeaseForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || leases_service::add_lease(repo.as_ref(), form)).await {
        Ok(lease) => {
            FlashMessage::success(format!("Contract {} drafted.", lease.contract_number)).send();
            redirect("/leases")
        }
        Err(err) => action_failed("add a lease", err, "/leases"),
    }
}

#[post("/leases/{lease_id}/status")]
pub async fn set_lease_status(
    lease_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let lease_id = lease_id.into_inner();
    let repo = repo.into_inner();
    let result =
        run_blocking(move || leases_service::set_lease_status(repo.as_ref(), lease_id, &form))
            .await;

    match result {
        Ok(lease) => {
            FlashMessage::success(format!(
                "Contract {} is now {}.",
                lease.contract_number, lease.status
            ))
            .send();
            redirect("/leases")
        }
        Err(err) => action_failed("change the lease status", err, "/leases"),
    }
}

#[post("/leases/{lease_id}/delete")]
pub async fn delete_lease(
    lease_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
) -> impl Responder {
    let lease_id = lease_id.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || leases_service::delete_lease(repo.as_ref(), lease_id)).await {
        Ok(()) => {
            FlashMessage::success("Contract deleted.").send();
            redirect("/leases")
        }
        Err(err) => action_failed("delete the lease", err, "/leases"),
    }
}
