use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::vehicles::VehiclesPageData;
use crate::forms::vehicles::{AddVehicleForm, UpdateVehicleForm};
use crate::read_model::VehicleReadModel;
use crate::repository::FleetRepository;
use crate::routes::{
    action_failed, base_context, insert_load_error, list_params, redirect, render_template,
    run_blocking,
};
use crate::services::vehicles as vehicles_service;

#[get("/vehicles")]
pub async fn show_vehicles(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = list_params(&req);
    let repo = repo.into_inner();
    let result =
        run_blocking(move || vehicles_service::load_vehicles_page(repo.as_ref(), &params)).await;

    let mut context = base_context(&flash_messages, "vehicles");
    let data = result.unwrap_or_else(|err| {
        log::error!("Failed to load vehicles: {err}");
        insert_load_error(&mut context, &req, &err);
        VehiclesPageData::empty()
    });
    context.insert("list", &data.list);
    context.insert("stats", &data.stats);

    render_template(&tera, "vehicles/index.html", &context)
}

#[post("/vehicles/add")]
pub async fn add_vehicle(
    repo: web::Data<dyn FleetRepository>,
    read_model: web::Data<VehicleReadModel>,
    web::Form(form): web::Form<AddVehicleForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let read_model = read_model.into_inner();
    let result = run_blocking(move || {
        vehicles_service::add_vehicle(repo.as_ref(), &read_model, form)
    })
    .await;

    match result {
        Ok(vehicle) => {
            FlashMessage::success(format!("Vehicle {} registered.", vehicle.plate_number)).send();
            redirect("/vehicles")
        }
        Err(err) => action_failed("add a vehicle", err, "/vehicles"),
    }
}

#[post("/vehicles/{vehicle_id}/update")]
pub async fn update_vehicle(
    vehicle_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
    read_model: web::Data<VehicleReadModel>,
    web::Form(form): web::Form<UpdateVehicleForm>,
) -> impl Responder {
    let vehicle_id = vehicle_id.into_inner();
    let repo = repo.into_inner();
    let read_model = read_model.into_inner();
    let result = run_blocking(move || {
        vehicles_service::update_vehicle(repo.as_ref(), &read_model, vehicle_id, form)
    })
    .await;

    match result {
        Ok(vehicle) => {
            FlashMessage::success(format!("Vehicle {} updated.", vehicle.plate_number)).send();
            redirect("/vehicles")
        }
        Err(err) => action_failed("update the vehicle", err, "/vehicles"),
    }
}

#[post("/vehicles/{vehicle_id}/delete")]
pub async fn delete_vehicle(
    vehicle_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
    read_model: web::Data<VehicleReadModel>,
) -> impl Responder {
    let vehicle_id = vehicle_id.into_inner();
    let repo = repo.into_inner();
    let read_model = read_model.into_inner();
    let result = run_blocking(move || {
        vehicles_service::delete_vehicle(repo.as_ref(), &read_model, vehicle_id)
    })
    .await;

    match result {
        Ok(()) => {
            FlashMessage::success("Vehicle deleted.").send();
            redirect("/vehicles")
        }
        Err(err) => action_failed("delete the vehicle", err, "/vehicles"),
    }
}
