use crate::domain::audit_log::NewAuditLog;
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::types::{
    AuditCategory, Choice, MaintenanceId, MaintenanceStatus, ServiceType,
};
use crate::dto::list::{ChoiceOption, ListView};
use crate::dto::maintenance::{MaintenancePageData, MaintenanceRow};
use crate::forms::StatusForm;
use crate::forms::maintenance::ScheduleMaintenanceForm;
use crate::query::state::ListParams;
use crate::read_model::VehicleReadModel;
use crate::repository::{AuditLogWriter, MaintenanceReader, MaintenanceWriter, VehicleReader};
use crate::services::leases::{vehicle_names, vehicle_options, vehicle_snapshot};
use crate::services::{ServiceError, ServiceResult, list_state, record_audit};

pub fn load_maintenance_page<R>(
    repo: &R,
    read_model: &VehicleReadModel,
    params: &ListParams,
) -> ServiceResult<MaintenancePageData>
where
    R: MaintenanceReader + VehicleReader + ?Sized,
{
    let state = list_state::<MaintenanceStatus, ServiceType>(params)?;
    let (total, records) = repo.list_maintenance(state.to_query())?;

    let vehicles = vehicle_snapshot(repo, read_model);
    let names = vehicle_names(&vehicles);
    let rows = records
        .into_iter()
        .map(|record| MaintenanceRow {
            vehicle: names.get(&record.vehicle_id).cloned(),
            record,
        })
        .collect();

    Ok(MaintenancePageData {
        list: ListView::new(&state, total, rows),
        vehicles: vehicle_options(&vehicles),
        maintenance_statuses: ChoiceOption::all::<MaintenanceStatus>(),
    })
}

pub fn schedule_maintenance<R>(
    repo: &R,
    form: ScheduleMaintenanceForm,
) -> ServiceResult<MaintenanceRecord>
where
    R: MaintenanceWriter + AuditLogWriter + ?Sized,
{
    let new_record = NewMaintenanceRecord::try_from(form).map_err(|err| {
        log::error!("Failed to validate maintenance form: {err}");
        ServiceError::from(err)
    })?;

    let record = repo.create_maintenance(&new_record)?;
    record_audit(
        repo,
        NewAuditLog::info(
            AuditCategory::Maintenance,
            "maintenance.schedule",
            format!("vehicle/{}", record.vehicle_id),
        )
        .details(format!("{} on {}", record.service_type.label(), record.scheduled_on)),
    );
    Ok(record)
}

pub fn set_maintenance_status<R>(
    repo: &R,
    record_id: i32,
    form: &StatusForm,
) -> ServiceResult<MaintenanceRecord>
where
    R: MaintenanceWriter + AuditLogWriter + ?Sized,
{
    let id = MaintenanceId::new(record_id)?;
    let status: MaintenanceStatus = form.parse()?;

    let record = repo.set_maintenance_status(id, status)?;
    record_audit(
        repo,
        NewAuditLog::info(
            AuditCategory::Maintenance,
            "maintenance.status",
            format!("maintenance/{id}"),
        )
        .details(format!("status={status}")),
    );
    Ok(record)
}

pub fn delete_maintenance<R>(repo: &R, record_id: i32) -> ServiceResult<()>
where
    R: MaintenanceWriter + AuditLogWriter + ?Sized,
{
    let id = MaintenanceId::new(record_id)?;
    repo.delete_maintenance(id)?;
    record_audit(
        repo,
        NewAuditLog::info(
            AuditCategory::Maintenance,
            "maintenance.delete",
            format!("maintenance/{id}"),
        ),
    );
    Ok(())
}
