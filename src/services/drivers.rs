use chrono::{NaiveDate, Utc};

use crate::domain::audit_log::NewAuditLog;
use crate::domain::driver::{Driver, NewDriver};
use crate::domain::types::{AuditCategory, DriverId, DriverStatus, Uncategorized};
use crate::dto::drivers::{DriverRow, DriversPageData};
use crate::dto::list::ListView;
use crate::forms::drivers::AddDriverForm;
use crate::query::state::{ListParams, ListState};
use crate::repository::{AuditLogWriter, DriverReader, DriverWriter};
use crate::services::export::{self, ExportFile};
use crate::services::{ServiceError, ServiceResult, list_state, record_audit};

type DriverListState = ListState<DriverStatus, Uncategorized>;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn load_drivers_page<R>(repo: &R, params: &ListParams) -> ServiceResult<DriversPageData>
where
    R: DriverReader + ?Sized,
{
    let state: DriverListState = list_state(params)?;
    let (total, drivers) = repo.list_drivers(state.to_query())?;

    let today = today();
    let rows = drivers
        .into_iter()
        .map(|driver| DriverRow {
            license_expired: driver.license_expired(today),
            driver,
        })
        .collect();

    Ok(DriversPageData {
        list: ListView::new(&state, total, rows),
        export_query: state.query_string(1),
    })
}

pub fn add_driver<R>(repo: &R, form: AddDriverForm) -> ServiceResult<Driver>
where
    R: DriverWriter + AuditLogWriter + ?Sized,
{
    let new_driver = NewDriver::try_from(form).map_err(|err| {
        log::error!("Failed to validate driver form: {err}");
        ServiceError::from(err)
    })?;

    let driver = repo.create_driver(&new_driver)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Driver, "driver.create", driver.email.as_str()),
    );
    Ok(driver)
}

/// Sets the driver status, or flips it when `status` is `None`.
pub fn change_driver_status<R>(
    repo: &R,
    driver_id: i32,
    status: Option<DriverStatus>,
) -> ServiceResult<Driver>
where
    R: DriverReader + DriverWriter + AuditLogWriter + ?Sized,
{
    let id = DriverId::new(driver_id)?;
    let status = match status {
        Some(status) => status,
        None => repo
            .get_driver_by_id(id)?
            .ok_or(ServiceError::NotFound)?
            .status
            .toggled(),
    };

    let driver = repo.set_driver_status(id, status)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Driver, "driver.status", driver.email.as_str())
            .details(format!("status={}", driver.status)),
    );
    Ok(driver)
}

/// Flips a driver between active and inactive.
pub fn toggle_driver<R>(repo: &R, driver_id: i32) -> ServiceResult<Driver>
where
    R: DriverReader + DriverWriter + AuditLogWriter + ?Sized,
{
    change_driver_status(repo, driver_id, None)
}

pub fn delete_driver<R>(repo: &R, driver_id: i32) -> ServiceResult<()>
where
    R: DriverWriter + AuditLogWriter + ?Sized,
{
    let id = DriverId::new(driver_id)?;
    repo.delete_driver(id)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Driver, "driver.delete", format!("driver/{id}")),
    );
    Ok(())
}

/// CSV of every driver matching the current filters, ignoring the page.
pub fn export_drivers<R>(repo: &R, params: &ListParams) -> ServiceResult<ExportFile>
where
    R: DriverReader + ?Sized,
{
    let state: DriverListState = list_state(params)?;
    let (_, drivers) = repo.list_drivers(state.to_query().unpaginated())?;
    export::drivers_csv(&drivers, today())
}
