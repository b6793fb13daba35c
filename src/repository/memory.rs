//! In-memory repository backed by the demo collections.
//!
//! Lists are answered by the in-memory query engine, so the behavior matches
//! the Diesel repository without a database. Writes mutate the collections and
//! enforce the same uniqueness and reference rules as the SQL schema.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::audit_log::{AuditLog, NewAuditLog};
use crate::domain::driver::{Driver, NewDriver};
use crate::domain::lease::{Lease, NewLease};
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::types::{
    AuditLevel, AuditLogId, DriverId, DriverStatus, LeaseId, LeaseStatus, MaintenanceId,
    MaintenanceStatus, VehicleId, VehicleStatus,
};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::query::engine::{self, Filterable};
use crate::query::stats::StatusCounts;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::mock_data::MockData;
use crate::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DriverListQuery,
    DriverReader, DriverWriter, LeaseListQuery, LeaseReader, LeaseWriter, MaintenanceListQuery,
    MaintenanceReader, MaintenanceWriter, VehicleCriteria, VehicleListQuery, VehicleReader,
    VehicleWriter,
};

/// Repository holding every collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: RwLock<MockData>,
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i32) -> i32 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

fn conflict(what: &str) -> RepositoryError {
    RepositoryError::ConstraintViolation(format!("Unique constraint violation: {what}"))
}

fn dangling(what: &str) -> RepositoryError {
    RepositoryError::ConstraintViolation(format!("Foreign key constraint violation: {what}"))
}

fn stats<T: Filterable>(
    items: &[T],
    criteria: &crate::query::criteria::FilterCriteria<T::Status, T::Category>,
) -> StatusCounts<T::Status> {
    StatusCounts::tally(engine::filter(items, criteria))
}

impl MemoryRepository {
    /// Empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: MockData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Collections pre-filled with the deterministic demo records.
    pub fn with_mock_data() -> RepositoryResult<Self> {
        Ok(Self::from_data(MockData::generate()?))
    }

    fn read(&self) -> RwLockReadGuard<'_, MockData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VehicleReader for MemoryRepository {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        Ok(self.read().vehicles.iter().find(|v| v.id == id).cloned())
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        Ok(engine::run(&self.read().vehicles, &query))
    }

    fn vehicle_stats(
        &self,
        criteria: &VehicleCriteria,
    ) -> RepositoryResult<StatusCounts<VehicleStatus>> {
        Ok(stats(&self.read().vehicles, criteria))
    }
}

impl VehicleWriter for MemoryRepository {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        let mut data = self.write();
        if data
            .vehicles
            .iter()
            .any(|v| v.plate_number == new_vehicle.plate_number.as_str())
        {
            return Err(conflict("vehicles.plate_number"));
        }

        let now = Utc::now().naive_utc();
        let vehicle = Vehicle {
            id: VehicleId::new(next_id(&data.vehicles, |v| v.id.get()))?,
            plate_number: new_vehicle.plate_number.as_str().to_string(),
            make: new_vehicle.make.clone(),
            model: new_vehicle.model.clone(),
            year: new_vehicle.year,
            vin: new_vehicle.vin.clone(),
            mileage_km: new_vehicle.mileage_km,
            status: new_vehicle.status,
            category: new_vehicle.category,
            created_at: now,
            updated_at: now,
        };
        data.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle> {
        let mut data = self.write();
        let vehicle = data
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RepositoryError::NotFound)?;

        vehicle.status = updates.status;
        vehicle.mileage_km = updates.mileage_km;
        vehicle.updated_at = Utc::now().naive_utc();
        Ok(vehicle.clone())
    }

    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        let mut data = self.write();
        if data.leases.iter().any(|l| l.vehicle_id == id)
            || data.maintenance.iter().any(|m| m.vehicle_id == id)
        {
            return Err(dangling("vehicle is still referenced"));
        }

        let before = data.vehicles.len();
        data.vehicles.retain(|v| v.id != id);
        if data.vehicles.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl DriverReader for MemoryRepository {
    fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>> {
        Ok(self.read().drivers.iter().find(|d| d.id == id).cloned())
    }

    fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)> {
        Ok(engine::run(&self.read().drivers, &query))
    }
}

impl DriverWriter for MemoryRepository {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver> {
        let mut data = self.write();
        if data
            .drivers
            .iter()
            .any(|d| d.email == new_driver.email.as_str())
        {
            return Err(conflict("drivers.email"));
        }
        if data
            .drivers
            .iter()
            .any(|d| d.license_number == new_driver.license_number.as_str())
        {
            return Err(conflict("drivers.license_number"));
        }

        let now = Utc::now().naive_utc();
        let driver = Driver {
            id: DriverId::new(next_id(&data.drivers, |d| d.id.get()))?,
            full_name: new_driver.full_name.as_str().to_string(),
            email: new_driver.email.as_str().to_string(),
            phone: new_driver.phone.as_ref().map(|p| p.as_str().to_string()),
            license_number: new_driver.license_number.as_str().to_string(),
            license_expiry: new_driver.license_expiry,
            status: new_driver.status,
            hired_on: new_driver.hired_on,
            created_at: now,
            updated_at: now,
        };
        data.drivers.push(driver.clone());
        Ok(driver)
    }

    fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver> {
        let mut data = self.write();
        let driver = data
            .drivers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(RepositoryError::NotFound)?;

        driver.status = status;
        driver.updated_at = Utc::now().naive_utc();
        Ok(driver.clone())
    }

    fn delete_driver(&self, id: DriverId) -> RepositoryResult<()> {
        let mut data = self.write();
        if data.leases.iter().any(|l| l.driver_id == Some(id)) {
            return Err(dangling("driver is still referenced"));
        }

        let before = data.drivers.len();
        data.drivers.retain(|d| d.id != id);
        if data.drivers.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl LeaseReader for MemoryRepository {
    fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>> {
        Ok(self.read().leases.iter().find(|l| l.id == id).cloned())
    }

    fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)> {
        Ok(engine::run(&self.read().leases, &query))
    }
}

impl LeaseWriter for MemoryRepository {
    fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease> {
        let mut data = self.write();
        if data
            .leases
            .iter()
            .any(|l| l.contract_number == new_lease.contract_number.as_str())
        {
            return Err(conflict("leases.contract_number"));
        }
        if !data.vehicles.iter().any(|v| v.id == new_lease.vehicle_id) {
            return Err(dangling("leases.vehicle_id"));
        }
        if let Some(driver_id) = new_lease.driver_id
            && !data.drivers.iter().any(|d| d.id == driver_id)
        {
            return Err(dangling("leases.driver_id"));
        }

        let lease = Lease {
            id: LeaseId::new(next_id(&data.leases, |l| l.id.get()))?,
            contract_number: new_lease.contract_number.as_str().to_string(),
            vehicle_id: new_lease.vehicle_id,
            driver_id: new_lease.driver_id,
            customer_name: new_lease.customer_name.as_str().to_string(),
            kind: new_lease.kind,
            status: new_lease.status,
            start_date: new_lease.start_date,
            end_date: new_lease.end_date,
            monthly_rate: new_lease.monthly_rate,
            created_at: Utc::now().naive_utc(),
        };
        data.leases.push(lease.clone());
        Ok(lease)
    }

    fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease> {
        let mut data = self.write();
        let lease = data
            .leases
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(RepositoryError::NotFound)?;

        lease.status = status;
        Ok(lease.clone())
    }

    fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()> {
        let mut data = self.write();
        let before = data.leases.len();
        data.leases.retain(|l| l.id != id);
        if data.leases.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl MaintenanceReader for MemoryRepository {
    fn get_maintenance_by_id(
        &self,
        id: MaintenanceId,
    ) -> RepositoryResult<Option<MaintenanceRecord>> {
        Ok(self.read().maintenance.iter().find(|m| m.id == id).cloned())
    }

    fn list_maintenance(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)> {
        Ok(engine::run(&self.read().maintenance, &query))
    }
}

impl MaintenanceWriter for MemoryRepository {
    fn create_maintenance(
        &self,
        new_record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut data = self.write();
        if !data.vehicles.iter().any(|v| v.id == new_record.vehicle_id) {
            return Err(dangling("maintenance_records.vehicle_id"));
        }

        let record = MaintenanceRecord {
            id: MaintenanceId::new(next_id(&data.maintenance, |m| m.id.get()))?,
            vehicle_id: new_record.vehicle_id,
            service_type: new_record.service_type,
            status: new_record.status,
            scheduled_on: new_record.scheduled_on,
            vendor: new_record.vendor.clone(),
            description: new_record.description.as_str().to_string(),
            cost: new_record.cost,
            created_at: Utc::now().naive_utc(),
        };
        data.maintenance.push(record.clone());
        Ok(record)
    }

    fn set_maintenance_status(
        &self,
        id: MaintenanceId,
        status: MaintenanceStatus,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut data = self.write();
        let record = data
            .maintenance
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepositoryError::NotFound)?;

        record.status = status;
        Ok(record.clone())
    }

    fn delete_maintenance(&self, id: MaintenanceId) -> RepositoryResult<()> {
        let mut data = self.write();
        let before = data.maintenance.len();
        data.maintenance.retain(|m| m.id != id);
        if data.maintenance.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl AuditLogReader for MemoryRepository {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)> {
        Ok(engine::run(&self.read().audit_logs, &query))
    }

    fn audit_log_stats(
        &self,
        criteria: &AuditLogCriteria,
    ) -> RepositoryResult<StatusCounts<AuditLevel>> {
        Ok(stats(&self.read().audit_logs, criteria))
    }
}

impl AuditLogWriter for MemoryRepository {
    fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        let mut data = self.write();
        let log = AuditLog {
            id: AuditLogId::new(next_id(&data.audit_logs, |l| l.id.get()))?,
            occurred_at: entry.occurred_at,
            actor: entry.actor.clone(),
            action: entry.action.clone(),
            resource: entry.resource.clone(),
            level: entry.level,
            category: entry.category,
            ip_address: entry.ip_address.clone(),
            details: entry.details.clone(),
        };
        data.audit_logs.push(log.clone());
        Ok(log)
    }
}
