use crate::domain::types::{AuditLevel, DriverStatus, LeaseStatus, MaintenanceStatus};
use crate::dto::main::DashboardData;
use crate::query::criteria::FilterCriteria;
use crate::query::pagination::PageRequest;
use crate::repository::{
    AuditLogListQuery, AuditLogReader, DriverListQuery, DriverReader, LeaseListQuery, LeaseReader,
    MaintenanceListQuery, MaintenanceReader, VehicleReader,
};
use crate::services::ServiceResult;

/// Rows shown in each dashboard panel.
const PANEL_ROWS: usize = 10;

/// Summary numbers and the newest noteworthy records for the home screen.
pub fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardData>
where
    R: VehicleReader + DriverReader + LeaseReader + MaintenanceReader + AuditLogReader + ?Sized,
{
    let panel = PageRequest::first(PANEL_ROWS)?;

    let vehicles = repo.vehicle_stats(&FilterCriteria::default())?;
    let (active_drivers, _) = repo.list_drivers(
        DriverListQuery::new()
            .status(DriverStatus::Active)
            .paginate(panel),
    )?;
    let (active_leases, _) = repo.list_leases(
        LeaseListQuery::new()
            .status(LeaseStatus::Active)
            .paginate(panel),
    )?;
    let (_, scheduled_maintenance) = repo.list_maintenance(
        MaintenanceListQuery::new()
            .status(MaintenanceStatus::Scheduled)
            .paginate(panel),
    )?;
    let (_, critical_events) = repo.list_audit_logs(
        AuditLogListQuery::new()
            .status(AuditLevel::Critical)
            .paginate(panel),
    )?;

    Ok(DashboardData {
        vehicles,
        active_drivers,
        active_leases,
        scheduled_maintenance,
        critical_events,
    })
}
