use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::dto::audit_logs::AuditLogsPageData;
use crate::repository::FleetRepository;
use crate::routes::{
    action_failed, attachment, base_context, insert_load_error, list_params, render_template,
    run_blocking,
};
use crate::services::audit_logs as audit_logs_service;
use crate::services::export::ExportFormat;

#[derive(Deserialize)]
struct ExportQuery {
    #[serde(default)]
    format: String,
}

#[get("/audit-logs")]
pub async fn show_audit_logs(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = list_params(&req);
    let repo = repo.into_inner();
    let result =
        run_blocking(move || audit_logs_service::load_audit_logs_page(repo.as_ref(), &params))
            .await;

    let mut context = base_context(&flash_messages, "audit_logs");
    let data = result.unwrap_or_else(|err| {
        log::error!("Failed to load audit logs: {err}");
        insert_load_error(&mut context, &req, &err);
        AuditLogsPageData::empty()
    });
    context.insert("list", &data.list);
    context.insert("stats", &data.stats);
    context.insert("export_query", &data.export_query);

    render_template(&tera, "audit_logs/index.html", &context)
}

#[get("/audit-logs/export")]
pub async fn export_audit_logs(
    req: HttpRequest,
    repo: web::Data<dyn FleetRepository>,
) -> HttpResponse {
    let format = serde_html_form::from_str::<ExportQuery>(req.query_string())
        .map(|query| query.format)
        .unwrap_or_default();
    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(err) => return action_failed("export audit logs", err, "/audit-logs"),
    };

    let params = list_params(&req);
    let repo = repo.into_inner();
    let result = run_blocking(move || {
        audit_logs_service::export_audit_logs(repo.as_ref(), &params, format)
    })
    .await;

    match result {
        Ok(file) => attachment(file),
        Err(err) => action_failed("export audit logs", err, "/audit-logs"),
    }
}
