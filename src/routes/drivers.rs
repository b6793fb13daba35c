use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::DriverStatus;
use crate::dto::drivers::DriversPageData;
use crate::forms::drivers::AddDriverForm;
use crate::repository::FleetRepository;
use crate::routes::{
    action_failed, attachment, base_context, insert_load_error, list_params, redirect,
    render_template, run_blocking,
};
use crate::services::drivers as drivers_service;

#[get("/drivers")]
pub async fn show_drivers(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = list_params(&req);
    let repo = repo.into_inner();
    let result =
        run_blocking(move || drivers_service::load_drivers_page(repo.as_ref(), &params)).await;

    let mut context = base_context(&flash_messages, "drivers");
    let data = result.unwrap_or_else(|err| {
        log::error!("Failed to load drivers: {err}");
        insert_load_error(&mut context, &req, &err);
        DriversPageData::empty()
    });
    context.insert("list", &data.list);
    context.insert("export_query", &data.export_query);

    render_template(&tera, "drivers/index.html", &context)
}

#[get("/drivers/export")]
pub async fn export_drivers(req: HttpRequest, repo: web::Data<dyn FleetRepository>) -> HttpResponse {
    let params = list_params(&req);
    let repo = repo.into_inner();
    match run_blocking(move || drivers_service::export_drivers(repo.as_ref(), &params)).await {
        Ok(file) => attachment(file),
        Err(err) => action_failed("export drivers", err, "/drivers"),
    }
}

#[post("/drivers/add")]
pub async fn add_driver(
    repo: web::Data<dyn FleetRepository>,
    web::Form(form): web::Form<AddDriverForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || drivers_service::add_driver(repo.as_ref(), form)).await {
        Ok(driver) => {
            FlashMessage::success(format!("Driver {} added.", driver.full_name)).send();
            redirect("/drivers")
        }
        Err(err) => action_failed("add a driver", err, "/drivers"),
    }
}

#[post("/drivers/{driver_id}/toggle")]
pub async fn toggle_driver(
    driver_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
) -> impl Responder {
    let driver_id = driver_id.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || drivers_service::toggle_driver(repo.as_ref(), driver_id)).await {
        Ok(driver) => {
            let state = match driver.status {
                DriverStatus::Active => "activated",
                DriverStatus::Inactive => "deactivated",
            };
            FlashMessage::success(format!("Driver {} {state}.", driver.full_name)).send();
            redirect("/drivers")
        }
        Err(err) => action_failed("toggle the driver", err, "/drivers"),
    }
}

#[post("/drivers/{driver_id}/delete")]
pub async fn delete_driver(
    driver_id: web::Path<i32>,
    repo: web::Data<dyn FleetRepository>,
) -> impl Responder {
    let driver_id = driver_id.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || drivers_service::delete_driver(repo.as_ref(), driver_id)).await {
        Ok(()) => {
            FlashMessage::success("Driver deleted.").send();
            redirect("/drivers")
        }
        Err(err) => action_failed("delete the driver", err, "/drivers"),
    }
}
