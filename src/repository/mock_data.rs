//! Deterministic demo collections served when no backend is reachable.
//!
//! The data is generated from fixed tables and the record index only, so every
//! process (and every test) sees exactly the same records.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::audit_log::AuditLog;
use crate::domain::driver::Driver;
use crate::domain::lease::Lease;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::types::{
    AuditCategory, AuditLevel, AuditLogId, Choice, ContractKind, DriverId, DriverStatus,
    LeaseId, LeaseStatus, MaintenanceId, MaintenanceStatus, ServiceType, TypeConstraintError,
    VehicleCategory, VehicleId, VehicleStatus,
};
use crate::domain::vehicle::Vehicle;

pub const MOCK_VEHICLES: usize = 36;
pub const MOCK_DRIVERS: usize = 24;
pub const MOCK_LEASES: usize = 30;
pub const MOCK_MAINTENANCE: usize = 40;
pub const MOCK_AUDIT_LOGS: usize = 200;

const MAKES: [(&str, &[&str]); 6] = [
    ("Toyota", &["Corolla", "RAV4", "Hilux"]),
    ("Ford", &["Transit", "Ranger", "Focus"]),
    ("Tesla", &["Model 3", "Model Y"]),
    ("Volkswagen", &["Golf", "Crafter", "ID.4"]),
    ("Mercedes-Benz", &["Sprinter", "E-Class"]),
    ("Volvo", &["XC60", "FH16"]),
];

const FIRST_NAMES: [&str; 8] = [
    "Anna", "Boris", "Clara", "Dmitry", "Elena", "Felix", "Galina", "Hugo",
];
const LAST_NAMES: [&str; 6] = ["Ivanova", "Petrov", "Smith", "Novak", "Kowalski", "Berg"];

const CUSTOMERS: [&str; 5] = [
    "Acme Logistics",
    "Northwind Traders",
    "Blue Harbor Rentals",
    "City Couriers",
    "Globex Field Services",
];

const VENDORS: [&str; 4] = [
    "QuickLube Service",
    "TireWorks",
    "Central Garage",
    "Fleet Care Partners",
];

const ACTORS: [&str; 4] = ["admin", "dispatcher", "system", "fleet.manager"];

const ACTIONS: [(&str, &str); 6] = [
    ("login", "session"),
    ("update_status", "vehicle"),
    ("toggle_status", "driver"),
    ("create", "lease"),
    ("schedule", "maintenance"),
    ("backup", "database"),
];

/// Fixed reference point the generated timestamps count back from.
pub fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default()
}

fn anchor() -> NaiveDateTime {
    anchor_date().and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN))
}

fn pick<T: Copy>(items: &[T], index: usize) -> T {
    items[index % items.len()]
}

fn id(index: usize) -> i32 {
    index as i32 + 1
}

/// Level pattern of the generated audit trail: one entry in ten is critical.
pub fn mock_audit_level(index: usize) -> AuditLevel {
    match index % 10 {
        0 => AuditLevel::Critical,
        1 | 2 => AuditLevel::Error,
        3..=5 => AuditLevel::Warning,
        _ => AuditLevel::Info,
    }
}

/// Complete set of demo collections.
#[derive(Clone, Debug, Default)]
pub struct MockData {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub leases: Vec<Lease>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub audit_logs: Vec<AuditLog>,
}

impl MockData {
    pub fn generate() -> Result<Self, TypeConstraintError> {
        Ok(Self {
            vehicles: vehicles()?,
            drivers: drivers()?,
            leases: leases()?,
            maintenance: maintenance()?,
            audit_logs: audit_logs()?,
        })
    }
}

fn vehicles() -> Result<Vec<Vehicle>, TypeConstraintError> {
    (0..MOCK_VEHICLES)
        .map(|i| {
            let (make, models) = pick(&MAKES, i);
            let model = pick(models, i / MAKES.len());
            let category = if make == "Tesla" || model == "ID.4" {
                VehicleCategory::Electric
            } else {
                pick(
                    &[
                        VehicleCategory::Sedan,
                        VehicleCategory::Suv,
                        VehicleCategory::Van,
                        VehicleCategory::Truck,
                    ],
                    i,
                )
            };
            let created_at = anchor() - Duration::days(i as i64 * 5) - Duration::minutes(i as i64);
            Ok(Vehicle {
                id: VehicleId::new(id(i))?,
                plate_number: format!("FL-{:04}", 1000 + i * 7),
                make: make.to_string(),
                model: model.to_string(),
                year: 2016 + (i % 10) as i32,
                vin: format!("WF0XXTTG{:09}", 400_000 + i * 131),
                mileage_km: ((i * 7_919) % 180_000) as i32,
                status: pick(VehicleStatus::all(), i),
                category,
                created_at,
                updated_at: created_at,
            })
        })
        .collect()
}

fn drivers() -> Result<Vec<Driver>, TypeConstraintError> {
    (0..MOCK_DRIVERS)
        .map(|i| {
            let first = pick(&FIRST_NAMES, i);
            let last = pick(&LAST_NAMES, i / FIRST_NAMES.len() + i);
            let hired_on = anchor_date() - Duration::days(i as i64 * 23);
            Ok(Driver {
                id: DriverId::new(id(i))?,
                full_name: format!("{first} {last}"),
                email: format!(
                    "{}.{}{}@fleet.example",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i
                ),
                phone: (i % 4 != 3).then(|| format!("+4915{:08}", 20_000_000 + i * 3_571)),
                license_number: format!("DL{:06}", 100_000 + i * 97),
                license_expiry: anchor_date() + Duration::days(i as i64 * 45 - 180),
                status: if i % 5 == 4 {
                    DriverStatus::Inactive
                } else {
                    DriverStatus::Active
                },
                hired_on,
                created_at: hired_on.and_time(NaiveTime::MIN),
                updated_at: hired_on.and_time(NaiveTime::MIN),
            })
        })
        .collect()
}

fn leases() -> Result<Vec<Lease>, TypeConstraintError> {
    (0..MOCK_LEASES)
        .map(|i| {
            let kind = if i % 3 == 0 {
                ContractKind::Rental
            } else {
                ContractKind::Lease
            };
            let start_date = anchor_date() - Duration::days(i as i64 * 11);
            let length = match kind {
                ContractKind::Rental => 14,
                ContractKind::Lease => 365,
            };
            Ok(Lease {
                id: LeaseId::new(id(i))?,
                contract_number: format!("CT-2025-{:04}", i + 1),
                vehicle_id: VehicleId::new(id(i % MOCK_VEHICLES))?,
                driver_id: (i % 4 != 0)
                    .then(|| DriverId::new(id(i % MOCK_DRIVERS)))
                    .transpose()?,
                customer_name: pick(&CUSTOMERS, i).to_string(),
                kind,
                status: pick(LeaseStatus::all(), i),
                start_date,
                end_date: start_date + Duration::days(length),
                monthly_rate: 35_000 + (i as i64 % 7) * 5_000,
                created_at: start_date.and_time(NaiveTime::MIN),
            })
        })
        .collect()
}

fn maintenance() -> Result<Vec<MaintenanceRecord>, TypeConstraintError> {
    (0..MOCK_MAINTENANCE)
        .map(|i| {
            let service_type = pick(ServiceType::all(), i);
            let scheduled_on = anchor_date() + Duration::days(30 - i as i64 * 4);
            Ok(MaintenanceRecord {
                id: MaintenanceId::new(id(i))?,
                vehicle_id: VehicleId::new(id((i * 5) % MOCK_VEHICLES))?,
                service_type,
                status: pick(MaintenanceStatus::all(), i / 2),
                scheduled_on,
                vendor: pick(&VENDORS, i).to_string(),
                description: format!("{} for unit #{}", service_type.label(), i + 1),
                cost: 8_000 + (i as i64 % 9) * 2_500,
                created_at: (scheduled_on - Duration::days(14)).and_time(NaiveTime::MIN),
            })
        })
        .collect()
}

fn audit_logs() -> Result<Vec<AuditLog>, TypeConstraintError> {
    (0..MOCK_AUDIT_LOGS)
        .map(|i| {
            let (action, resource_kind) = pick(&ACTIONS, i);
            let category = pick(AuditCategory::all(), i);
            Ok(AuditLog {
                id: AuditLogId::new(id(i))?,
                occurred_at: anchor() - Duration::minutes(i as i64 * 97),
                actor: pick(&ACTORS, i / 3).to_string(),
                action: action.to_string(),
                resource: format!("{resource_kind}/{}", i % 17 + 1),
                level: mock_audit_level(i),
                category,
                ip_address: Some(format!("10.0.{}.{}", i % 8, i % 250 + 1)),
                details: format!("{action} on {resource_kind} ({})", category.label()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = MockData::generate().unwrap();
        let b = MockData::generate().unwrap();
        assert_eq!(a.vehicles, b.vehicles);
        assert_eq!(a.audit_logs, b.audit_logs);
        assert_eq!(a.audit_logs.len(), MOCK_AUDIT_LOGS);
    }

    #[test]
    fn every_tenth_audit_entry_is_critical() {
        let data = MockData::generate().unwrap();
        let critical = data
            .audit_logs
            .iter()
            .filter(|log| log.level == AuditLevel::Critical)
            .count();
        assert_eq!(critical, MOCK_AUDIT_LOGS / 10);
    }

    #[test]
    fn unique_keys_do_not_collide() {
        let data = MockData::generate().unwrap();
        let plates: HashSet<_> = data.vehicles.iter().map(|v| &v.plate_number).collect();
        let emails: HashSet<_> = data.drivers.iter().map(|d| &d.email).collect();
        let contracts: HashSet<_> = data.leases.iter().map(|l| &l.contract_number).collect();
        assert_eq!(plates.len(), MOCK_VEHICLES);
        assert_eq!(emails.len(), MOCK_DRIVERS);
        assert_eq!(contracts.len(), MOCK_LEASES);
    }

    #[test]
    fn references_point_at_existing_records() {
        let data = MockData::generate().unwrap();
        let vehicle_ids: HashSet<_> = data.vehicles.iter().map(|v| v.id).collect();
        let driver_ids: HashSet<_> = data.drivers.iter().map(|d| d.id).collect();
        assert!(data.leases.iter().all(|l| vehicle_ids.contains(&l.vehicle_id)));
        assert!(
            data.leases
                .iter()
                .filter_map(|l| l.driver_id)
                .all(|id| driver_ids.contains(&id))
        );
        assert!(
            data.maintenance
                .iter()
                .all(|m| vehicle_ids.contains(&m.vehicle_id))
        );
    }
}
