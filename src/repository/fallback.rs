//! Primary data source with a mock-data safety net for reads.

use log::warn;

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
use crate::repository::errors::{ErrorKind, RepositoryResult};
use crate::repository::memory::MemoryRepository;
use crate::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DriverListQuery,
    DriverReader, DriverWriter, LeaseListQuery, LeaseReader, LeaseWriter, MaintenanceListQuery,
    MaintenanceReader, MaintenanceWriter, StatsPage, VehicleCriteria, VehicleListQuery,
    VehicleReader, VehicleWriter,
};

/// Serves reads from `primary` and, when it fails, from the in-memory mock
/// collections. Writes always go to `primary`.
///
/// Validation failures are not masked: the same request would be rejected by
/// the fallback too.
pub struct FallbackRepository<P> {
    primary: P,
    fallback: MemoryRepository,
}

impl<P> FallbackRepository<P> {
    pub fn new(primary: P, fallback: MemoryRepository) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    fn read<T>(
        &self,
        operation: &str,
        primary: impl FnOnce(&P) -> RepositoryResult<T>,
        fallback: impl FnOnce(&MemoryRepository) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        match primary(&self.primary) {
            Ok(value) => Ok(value),
            Err(err) if err.kind() == ErrorKind::Validation => Err(err),
            Err(err) => {
                warn!("{operation} failed, serving mock data instead: {err}");
                fallback(&self.fallback)
            }
        }
    }
}

impl<P: VehicleReader> VehicleReader for FallbackRepository<P> {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        self.read(
            "get_vehicle_by_id",
            |p| p.get_vehicle_by_id(id),
            |f| f.get_vehicle_by_id(id),
        )
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        let retry = query.clone();
        self.read(
            "list_vehicles",
            |p| p.list_vehicles(query),
            |f| f.list_vehicles(retry),
        )
    }

    fn vehicle_stats(
        &self,
        criteria: &VehicleCriteria,
    ) -> RepositoryResult<StatusCounts<VehicleStatus>> {
        self.read(
            "vehicle_stats",
            |p| p.vehicle_stats(criteria),
            |f| f.vehicle_stats(criteria),
        )
    }

    fn vehicle_page(
        &self,
        query: VehicleListQuery,
    ) -> RepositoryResult<StatsPage<Vehicle, VehicleStatus>> {
        let retry = query.clone();
        self.read(
            "vehicle_page",
            |p| p.vehicle_page(query),
            |f| f.vehicle_page(retry),
        )
    }
}

impl<P: VehicleWriter> VehicleWriter for FallbackRepository<P> {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        self.primary.create_vehicle(new_vehicle)
    }

    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle> {
        self.primary.update_vehicle(id, updates)
    }

    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        self.primary.delete_vehicle(id)
    }
}

impl<P: DriverReader> DriverReader for FallbackRepository<P> {
    fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>> {
        self.read(
            "get_driver_by_id",
            |p| p.get_driver_by_id(id),
            |f| f.get_driver_by_id(id),
        )
    }

    fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)> {
        let retry = query.clone();
        self.read(
            "list_drivers",
            |p| p.list_drivers(query),
            |f| f.list_drivers(retry),
        )
    }
}

impl<P: DriverWriter> DriverWriter for FallbackRepository<P> {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver> {
        self.primary.create_driver(new_driver)
    }

    fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver> {
        self.primary.set_driver_status(id, status)
    }

    fn delete_driver(&self, id: DriverId) -> RepositoryResult<()> {
        self.primary.delete_driver(id)
    }
}

impl<P: LeaseReader> LeaseReader for FallbackRepository<P> {
    fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>> {
        self.read(
            "get_lease_by_id",
            |p| p.get_lease_by_id(id),
            |f| f.get_lease_by_id(id),
        )
    }

    fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)> {
        let retry = query.clone();
        self.read(
            "list_leases",
            |p| p.list_leases(query),
            |f| f.list_leases(retry),
        )
    }
}

impl<P: LeaseWriter> LeaseWriter for FallbackRepository<P> {
    fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease> {
        self.primary.create_lease(new_lease)
    }

    fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease> {
        self.primary.set_lease_status(id, status)
    }

    fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()> {
        self.primary.delete_lease(id)
    }
}

impl<P: MaintenanceReader> MaintenanceReader for FallbackRepository<P> {
    fn get_maintenance_by_id(
        &self,
        id: MaintenanceId,
    ) -> RepositoryResult<Option<MaintenanceRecord>> {
        self.read(
            "get_maintenance_by_id",
            |p| p.get_maintenance_by_id(id),
            |f| f.get_maintenance_by_id(id),
        )
    }

    fn list_maintenance(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)> {
        let retry = query.clone();
        self.read(
            "list_maintenance",
            |p| p.list_maintenance(query),
            |f| f.list_maintenance(retry),
        )
    }
}

impl<P: MaintenanceWriter> MaintenanceWriter for FallbackRepository<P> {
    fn create_maintenance(
        &self,
        new_record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        self.primary.create_maintenance(new_record)
    }

    fn set_maintenance_status(
        &self,
        id: MaintenanceId,
        status: MaintenanceStatus,
    ) -> RepositoryResult<MaintenanceRecord> {
        self.primary.set_maintenance_status(id, status)
    }

    fn delete_maintenance(&self, id: MaintenanceId) -> RepositoryResult<()> {
        self.primary.delete_maintenance(id)
    }
}

impl<P: AuditLogReader> AuditLogReader for FallbackRepository<P> {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)> {
        let retry = query.clone();
        self.read(
            "list_audit_logs",
            |p| p.list_audit_logs(query),
            |f| f.list_audit_logs(retry),
        )
    }

    fn audit_log_stats(
        &self,
        criteria: &AuditLogCriteria,
    ) -> RepositoryResult<StatusCounts<AuditLevel>> {
        self.read(
            "audit_log_stats",
            |p| p.audit_log_stats(criteria),
            |f| f.audit_log_stats(criteria),
        )
    }

    fn audit_log_page(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<StatsPage<AuditLog, AuditLevel>> {
        let retry = query.clone();
        self.read(
            "audit_log_page",
            |p| p.audit_log_page(query),
            |f| f.audit_log_page(retry),
        )
    }
}

impl<P: AuditLogWriter> AuditLogWriter for FallbackRepository<P> {
    fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        self.primary.record_audit_log(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::pagination::PageRequest;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::repository::mock_data::{MOCK_AUDIT_LOGS, MOCK_VEHICLES};

    fn mock_backed(primary: MockRepository) -> FallbackRepository<MockRepository> {
        FallbackRepository::new(primary, MemoryRepository::with_mock_data().unwrap())
    }

    #[test]
    fn failed_list_is_served_from_mock_data() {
        let mut primary = MockRepository::new();
        primary
            .expect_list_audit_logs()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".into())));
        let repo = mock_backed(primary);

        let query = AuditLogListQuery::new()
            .status(AuditLevel::Critical)
            .paginate(PageRequest::new(1, 10).unwrap());
        let (total, items) = repo.list_audit_logs(query).unwrap();

        assert_eq!(total, 20);
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn page_and_stats_fall_back_together() {
        let mut primary = MockRepository::new();
        primary
            .expect_vehicle_stats()
            .returning(|_| Err(RepositoryError::ConnectionError("reset".into())));
        primary.expect_list_vehicles().never();
        let repo = mock_backed(primary);

        let (total, items, stats) = repo
            .vehicle_page(VehicleListQuery::new().paginate(PageRequest::new(1, 10).unwrap()))
            .unwrap();

        assert_eq!(total, MOCK_VEHICLES);
        assert_eq!(items.len(), 10);
        assert_eq!(stats.total(), MOCK_VEHICLES);
    }

    #[test]
    fn stats_failure_does_not_mix_sources() {
        let mut primary = MockRepository::new();
        primary
            .expect_list_audit_logs()
            .returning(|_| Ok((1, vec![])));
        primary
            .expect_audit_log_stats()
            .returning(|_| Err(RepositoryError::ConnectionError("reset".into())));
        let repo = mock_backed(primary);

        let (total, _, stats) = repo.audit_log_page(AuditLogListQuery::new()).unwrap();

        // Both halves come from the mock trail, not one from each source.
        assert_eq!(total, MOCK_AUDIT_LOGS);
        assert_eq!(stats.total(), MOCK_AUDIT_LOGS);
    }

    #[test]
    fn validation_errors_are_not_masked() {
        let mut primary = MockRepository::new();
        primary
            .expect_list_vehicles()
            .returning(|_| Err(RepositoryError::ValidationError("bad filter".into())));
        let repo = mock_backed(primary);

        assert!(matches!(
            repo.list_vehicles(VehicleListQuery::new()),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn writes_never_fall_back() {
        let mut primary = MockRepository::new();
        primary
            .expect_delete_lease()
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));
        let repo = mock_backed(primary);

        assert!(repo.delete_lease(LeaseId::new(1).unwrap()).is_err());
        assert!(
            repo.fallback
                .get_lease_by_id(LeaseId::new(1).unwrap())
                .unwrap()
                .is_some()
        );
    }
}
