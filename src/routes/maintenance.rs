use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::maintenance::MaintenancePageData;
use crate::forms::StatusForm;
use crate::forms::maintenance::ScheduleMaintenanceForm;
use crate::read_model::VehicleReadModel;
use crate::repository::FleetRepository;
use crate::routes::{
    action_failed, base_context, insert_load_error, list_params, redirect, render_template,
    run_blocking,
};
use crate::services::maintenance as maintenance_service;

#[get("/maintenance")]
pub async fn show_maintenance(
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
        maintenance_service::load_maintenance_page(repo.as_ref(), &read_model, &params)
    })
    .await;

    let mut context = base_context(&flash_messages, "maintenance");
    let data = result.unwrap_or_else(|err| {
        log::error!("Failed to load maintenance records: {err}");
        insert_load_error(&mut context, &req, &err);
        MaintenancePageData::empty()
    });
    context.insert("list", &data.list);
    context.insert("vehicles", &data.vehicles);
    context.insert("maintenance_statuses", &data.maintenance_statuses);

    render_template(&tera, "maintenance/index.html", &context)
}

#[post("/maintenance/add")]
pub async fn schedule_maintenance(
    repo: web::Data<dyn FleetRepository>,
    web::Form(form): web::Form<ScheduleMaintenanceForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || maintenance_service::schedule_maintenance(repo.as_ref(), form)).await
    {
        Ok(record) => {
            FlashMessage::success(format!("Service scheduled for {}.", record.scheduled_on))
                .send();
            redirect("/maintenance")
        }
        Err(err) => action_failed("schedule maintenance", err, "/maintenance"),
    }
}

#[post("/maintenance/{record_id}/status")]
pub async fn set_maintenance_status(
    record_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let record_id = record_id.into_inner();
    let repo = repo.into_inner();
    let result = run_blocking(move || {
        maintenance_service::set_maintenance_status(repo.as_ref(), record_id, &form)
    })
    .await;

    match result {
        Ok(record) => {
            FlashMessage::success(format!("Maintenance record is now {}.", record.status)).send();
            redirect("/maintenance")
        }
        Err(err) => action_failed("change the maintenance status", err, "/maintenance"),
    }
}

#[post("/maintenance/{record_id}/delete")]
pub async fn delete_maintenance(
    record_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
) -> impl Responder {
    let record_id = record_id.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || maintenance_service::delete_maintenance(repo.as_ref(), record_id))
        .await
    {
        Ok(()) => {
            FlashMessage::success("Maintenance record deleted.").send();
            redirect("/maintenance")
        }
        Err(err) => action_failed("delete the maintenance record", err, "/maintenance"),
    }
}
