//! HTTP handlers for the fleet screens and the JSON API.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use log::error;
use serde::Serialize;
use tera::{Context, Tera};

use crate::dto::api::ErrorResponse;
use crate::query::state::ListParams;
use crate::services::export::ExportFile;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod audit_logs;
pub mod drivers;
pub mod leases;
pub mod main;
pub mod maintenance;
pub mod vehicles;

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending toasts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Lenient query-string parsing: repeated or unknown keys never fail the
/// request, unknown values are rejected later by the list state.
pub fn list_params(req: &HttpRequest) -> ListParams {
    serde_html_form::from_str(req.query_string()).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed query string `{}`: {err}", req.query_string());
        ListParams::default()
    })
}

/// Runs a blocking service call on the blocking thread pool.
pub async fn run_blocking<T, F>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|err| ServiceError::Internal(err.to_string()))?
}

/// Inline alert shown in place of a list that failed to load.
pub fn insert_load_error(context: &mut Context, req: &HttpRequest, err: &ServiceError) {
    context.insert("load_error", &err.user_message());
    context.insert("retry_href", &req.uri().to_string());
}

/// Flash message for a failed form action, then back to `location`.
pub fn action_failed(action: &str, err: ServiceError, location: &str) -> HttpResponse {
    match &err {
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::Conflict(_) => {}
        _ => error!("Failed to {action}: {err}"),
    }
    FlashMessage::error(err.user_message()).send();
    redirect(location)
}

pub fn json_ok<T: Serialize>(value: &T) -> HttpResponse {
    HttpResponse::Ok().json(value)
}

pub fn json_error(err: ServiceError) -> HttpResponse {
    let kind = err.kind();
    if matches!(err, ServiceError::Repository(_) | ServiceError::Internal(_)) {
        error!("API request failed: {err}");
    }
    let status =
        StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        kind,
        message: err.user_message(),
    })
}

pub fn attachment(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.filename)],
        })
        .body(file.body)
}
