use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::FleetRepository;
use crate::routes::{base_context, render_template, run_blocking};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    repo: web::Data<dyn FleetRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.into_inner();
    let result = run_blocking(move || main_service::load_dashboard(repo.as_ref())).await;

    let mut context = base_context(&flash_messages, "index");
    match result {
        Ok(data) => context.insert("dashboard", &data),
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            context.insert("load_error", &err.user_message());
            context.insert("retry_href", "/");
        }
    }

    render_template(&tera, "main/index.html", &context)
}
