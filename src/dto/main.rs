use serde::Serialize;

use crate::domain::audit_log::AuditLog;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::types::VehicleStatus;
use crate::query::stats::StatusCounts;

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub vehicles: StatusCounts<VehicleStatus>,
    pub active_drivers: usize,
    pub active_leases: usize,
    pub scheduled_maintenance: Vec<MaintenanceRecord>,
    /// Newest critical audit entries.
    pub critical_events: Vec<AuditLog>,
}
