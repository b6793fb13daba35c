use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        audit_log::{AuditLog, NewAuditLog},
        driver::{Driver, NewDriver},
        lease::{Lease, NewLease},
        maintenance::{MaintenanceRecord, NewMaintenanceRecord},
        types::{
            AuditCategory, AuditLevel, ContractKind, DriverId, DriverStatus, LeaseId,
            LeaseStatus, MaintenanceId, MaintenanceStatus, ServiceType, Uncategorized, VehicleCategory,
            VehicleId, VehicleStatus,
        },
        vehicle::{NewVehicle, UpdateVehicle, Vehicle},
    },
    query::{ListQuery, criteria::FilterCriteria, stats::StatusCounts},
    repository::errors::RepositoryResult,
};

pub mod audit_log;
pub mod driver;
pub mod envelope;
pub mod errors;
pub mod fallback;
#[cfg(feature = "server")]
pub mod http;
pub mod lease;
pub mod maintenance;
pub mod memory;
pub mod mock_data;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod vehicle;

mod sql;

pub type VehicleListQuery = ListQuery<VehicleStatus, VehicleCategory>;
pub type DriverListQuery = ListQuery<DriverStatus, Uncategorized>;
pub type LeaseListQuery = ListQuery<LeaseStatus, ContractKind>;
pub type MaintenanceListQuery = ListQuery<MaintenanceStatus, ServiceType>;
pub type AuditLogListQuery = ListQuery<AuditLevel, AuditCategory>;

pub type VehicleCriteria = FilterCriteria<VehicleStatus, VehicleCategory>;
pub type AuditLogCriteria = FilterCriteria<AuditLevel, AuditCategory>;

/// `(total, page items, per-status counts of the filtered set)`.
pub type StatsPage<T, S> = (usize, Vec<T>, StatusCounts<S>);

/// Diesel-backed repository over the SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait VehicleReader {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
    /// Per-status counts over every vehicle matching `criteria`.
    fn vehicle_stats(
        &self,
        criteria: &VehicleCriteria,
    ) -> RepositoryResult<StatusCounts<VehicleStatus>>;

    /// A page of vehicles and the counts behind it, read from one source.
    fn vehicle_page(
        &self,
        query: VehicleListQuery,
    ) -> RepositoryResult<StatsPage<Vehicle, VehicleStatus>> {
        let stats = self.vehicle_stats(&query.criteria)?;
        let (total, items) = self.list_vehicles(query)?;
        Ok((total, items, stats))
    }
}

pub trait VehicleWriter {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle>;
    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
}

pub trait DriverReader {
    fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>>;
    fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)>;
}

pub trait DriverWriter {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver>;
    fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver>;
    fn delete_driver(&self, id: DriverId) -> RepositoryResult<()>;
}

pub trait LeaseReader {
    fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>>;
    fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)>;
}

pub trait LeaseWriter {
    fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease>;
    fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease>;
    fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()>;
}

pub trait MaintenanceReader {
    fn get_maintenance_by_id(
        &self,
        id: MaintenanceId,
    ) -> RepositoryResult<Option<MaintenanceRecord>>;
    fn list_maintenance(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)>;
}

pub trait MaintenanceWriter {
    fn create_maintenance(
        &self,
        new_record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord>;
    fn set_maintenance_status(
        &self,
        id: MaintenanceId,
        status: MaintenanceStatus,
    ) -> RepositoryResult<MaintenanceRecord>;
    fn delete_maintenance(&self, id: MaintenanceId) -> RepositoryResult<()>;
}

pub trait AuditLogReader {
    fn list_audit_logs(&self, query: AuditLogListQuery)
    -> RepositoryResult<(usize, Vec<AuditLog>)>;
    /// Per-level counts over every entry matching `criteria`.
    fn audit_log_stats(
        &self,
        criteria: &AuditLogCriteria,
    ) -> RepositoryResult<StatusCounts<AuditLevel>>;

    /// A page of entries and the per-level counts behind it, read from one source.
    fn audit_log_page(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<StatsPage<AuditLog, AuditLevel>> {
        let stats = self.audit_log_stats(&query.criteria)?;
        let (total, items) = self.list_audit_logs(query)?;
        Ok((total, items, stats))
    }
}

pub trait AuditLogWriter {
    fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog>;
}

/// Everything the dashboard needs from a data source.
pub trait FleetRepository:
    VehicleReader
    + VehicleWriter
    + DriverReader
    + DriverWriter
    + LeaseReader
    + LeaseWriter
    + MaintenanceReader
    + MaintenanceWriter
    + AuditLogReader
    + AuditLogWriter
    + Send
    + Sync
{
}

impl<T> FleetRepository for T where
    T: VehicleReader
        + VehicleWriter
        + DriverReader
        + DriverWriter
        + LeaseReader
        + LeaseWriter
        + MaintenanceReader
        + MaintenanceWriter
        + AuditLogReader
        + AuditLogWriter
        + Send
        + Sync
{
}
