use std::io;
#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::{DataSource, ServerConfig};
#[cfg(feature = "server")]
use crate::read_model::VehicleReadModel;
#[cfg(feature = "server")]
use crate::repository::fallback::FallbackRepository;
#[cfg(feature = "server")]
use crate::repository::http::HttpRepository;
use crate::repository::memory::MemoryRepository;
#[cfg(feature = "server")]
use crate::repository::{DieselRepository, FleetRepository};
#[cfg(feature = "server")]
use crate::routes::api::{
    api_v1_audit_logs, api_v1_driver_status, api_v1_drivers, api_v1_leases, api_v1_maintenance,
    api_v1_vehicles,
};
#[cfg(feature = "server")]
use crate::routes::audit_logs::{export_audit_logs, show_audit_logs};
#[cfg(feature = "server")]
use crate::routes::drivers::{add_driver, delete_driver, export_drivers, show_drivers, toggle_driver};
#[cfg(feature = "server")]
use crate::routes::leases::{add_lease, delete_lease, set_lease_status, show_leases};
#[cfg(feature = "server")]
use crate::routes::main::show_index;
#[cfg(feature = "server")]
use crate::routes::maintenance::{
    delete_maintenance, schedule_maintenance, set_maintenance_status, show_maintenance,
};
#[cfg(feature = "server")]
use crate::routes::vehicles::{add_vehicle, delete_vehicle, show_vehicles, update_vehicle};

pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod query;
pub mod read_model;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Minimum length of the cookie signing secret accepted by `Key::from`.
pub const MIN_SECRET_LEN: usize = 64;

/// In-memory repository seeded with the generated mock fleet.
pub fn mock_repository() -> io::Result<MemoryRepository> {
    MemoryRepository::with_mock_data()
        .map_err(|e| io::Error::other(format!("Failed to generate mock data: {e}")))
}

#[cfg(feature = "server")]
fn with_fallback<P>(primary: P, enabled: bool) -> io::Result<Arc<dyn FleetRepository>>
where
    P: FleetRepository + 'static,
{
    if enabled {
        Ok(Arc::new(FallbackRepository::new(primary, mock_repository()?)))
    } else {
        Ok(Arc::new(primary))
    }
}

/// Builds the repository selected by `data_source`.
///
/// Must be called outside the async runtime: the upstream client is blocking.
#[cfg(feature = "server")]
pub fn build_repository(server_config: &ServerConfig) -> io::Result<Arc<dyn FleetRepository>> {
    match server_config.data_source {
        DataSource::Mock => {
            log::info!("Serving the built-in mock fleet");
            Ok(Arc::new(mock_repository()?))
        }
        DataSource::Database => {
            let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
                io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            with_fallback(DieselRepository::new(pool), server_config.fallback_to_mock)
        }
        DataSource::Upstream => {
            let upstream = server_config.upstream.as_ref().ok_or_else(|| {
                io::Error::other("`upstream` settings are required for the upstream data source")
            })?;
            log::info!("Reading fleet data from {}", upstream.base_url);
            let repo = HttpRepository::new(upstream)
                .map_err(|e| io::Error::other(format!("Failed to build upstream client: {e}")))?;
            with_fallback(repo, server_config.fallback_to_mock)
        }
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig, repo: Arc<dyn FleetRepository>) -> io::Result<()> {
    if server_config.secret.len() < MIN_SECRET_LEN {
        return Err(io::Error::other(format!(
            "`secret` must be at least {MIN_SECRET_LEN} bytes long"
        )));
    }
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| io::Error::other(format!("Template parsing error(s): {e}")))?;

    let repo: web::Data<dyn FleetRepository> = web::Data::from(repo);
    let read_model = web::Data::new(VehicleReadModel::new());
    let tera = web::Data::new(tera);
    let config = web::Data::new(server_config.clone());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("/api")
                    .service(api_v1_vehicles)
                    .service(api_v1_drivers)
                    .service(api_v1_driver_status)
                    .service(api_v1_leases)
                    .service(api_v1_maintenance)
                    .service(api_v1_audit_logs),
            )
            .service(show_index)
            .service(show_vehicles)
            .service(add_vehicle)
            .service(update_vehicle)
            .service(delete_vehicle)
            .service(export_drivers)
            .service(show_drivers)
            .service(add_driver)
            .service(toggle_driver)
            .service(delete_driver)
            .service(show_leases)
            .service(add_lease)
            .service(set_lease_status)
            .service(delete_lease)
            .service(show_maintenance)
            .service(schedule_maintenance)
            .service(set_maintenance_status)
            .service(delete_maintenance)
            .service(export_audit_logs)
            .service(show_audit_logs)
            .app_data(repo.clone())
            .app_data(read_model.clone())
            .app_data(tera.clone())
            .app_data(config.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
