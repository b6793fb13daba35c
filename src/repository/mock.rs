//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::audit_log::{AuditLog, NewAuditLog};
use crate::domain::driver::{Driver, NewDriver};
use crate::domain::lease::{Lease, NewLease};
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::types::{
    AuditLevel, DriverId, DriverStatus, LeaseId, LeaseStatus, MaintenanceId, MaintenanceStatus,
    VehicleId, VehicleStatus,
};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::query::stats::StatusCounts;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DriverListQuery,
    DriverReader, DriverWriter, LeaseListQuery, LeaseReader, LeaseWriter, MaintenanceListQuery,
    MaintenanceReader, MaintenanceWriter, VehicleCriteria, VehicleListQuery, VehicleReader,
    VehicleWriter,
};

mock! {
    pub Repository {}

    impl VehicleReader for Repository {
        fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
        fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
        fn vehicle_stats(
            &self,
            criteria: &VehicleCriteria,
        ) -> RepositoryResult<StatusCounts<VehicleStatus>>;
    }

    impl VehicleWriter for Repository {
        fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
        fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle>;
        fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
    }

    impl DriverReader for Repository {
        fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>>;
        fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)>;
    }

    impl DriverWriter for Repository {
        fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver>;
        fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver>;
        fn delete_driver(&self, id: DriverId) -> RepositoryResult<()>;
    }

    impl LeaseReader for Repository {
        fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>>;
        fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)>;
    }

    impl LeaseWriter for Repository {
        fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease>;
        fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease>;
        fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()>;
    }

    impl MaintenanceReader for Repository {
        fn get_maintenance_by_id(
            &self,
            id: MaintenanceId,
        ) -> RepositoryResult<Option<MaintenanceRecord>>;
        fn list_maintenance(
            &self,
            query: MaintenanceListQuery,
        ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)>;
    }

    impl MaintenanceWriter for Repository {
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

    impl AuditLogReader for Repository {
        fn list_audit_logs(
            &self,
            query: AuditLogListQuery,
        ) -> RepositoryResult<(usize, Vec<AuditLog>)>;
        fn audit_log_stats(
            &self,
            criteria: &AuditLogCriteria,
        ) -> RepositoryResult<StatusCounts<AuditLevel>>;
    }

    impl AuditLogWriter for Repository {
        fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog>;
    }
}
