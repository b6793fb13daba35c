use chrono::{NaiveDate, Utc};
use pushkind_fleet::domain::audit_log::NewAuditLog;
use pushkind_fleet::domain::driver::NewDriver;
use pushkind_fleet::domain::lease::NewLease;
use pushkind_fleet::domain::maintenance::NewMaintenanceRecord;
use pushkind_fleet::domain::types::{
    AuditCategory, AuditLevel, ContractKind, DriverId, DriverStatus, LeaseStatus,
    MaintenanceStatus, ServiceType, VehicleCategory, VehicleId, VehicleStatus,
};
use pushkind_fleet::domain::vehicle::{NewVehicle, UpdateVehicle};
use pushkind_fleet::query::criteria::DateRange;
use pushkind_fleet::query::pagination::PageRequest;
use pushkind_fleet::repository::errors::RepositoryError;
use pushkind_fleet::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DieselRepository,
    DriverListQuery, DriverReader, DriverWriter, LeaseListQuery, LeaseReader, LeaseWriter,
    MaintenanceListQuery, MaintenanceReader, MaintenanceWriter, VehicleCriteria,
    VehicleListQuery, VehicleReader, VehicleWriter,
};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_vehicle(plate: &str, status: VehicleStatus, category: VehicleCategory) -> NewVehicle {
    NewVehicle::try_new(
        plate,
        "Toyota",
        "Corolla",
        2022,
        "JTDBR32E720012345",
        15_000,
        status,
        category,
    )
    .unwrap()
}

fn new_driver(name: &str, email: &str, license: &str) -> NewDriver {
    NewDriver::try_new(
        name,
        email,
        Some("+14155552671"),
        license,
        date(2030, 1, 1),
        date(2023, 5, 1),
    )
    .unwrap()
}

#[test]
fn test_vehicle_repository_crud() {
    let test_db = common::TestDb::new("test_vehicle_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let sedan = repo
        .create_vehicle(&new_vehicle("ab-123", VehicleStatus::Available, VehicleCategory::Sedan))
        .unwrap();
    repo.create_vehicle(&new_vehicle("CD-456", VehicleStatus::Leased, VehicleCategory::Suv))
        .unwrap();

    assert_eq!(sedan.plate_number, "AB-123");

    let (total, items) = repo.list_vehicles(VehicleListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let updated = repo
        .update_vehicle(
            sedan.id,
            &UpdateVehicle {
                status: VehicleStatus::Maintenance,
                mileage_km: 16_500,
            },
        )
        .unwrap();
    assert_eq!(updated.status, VehicleStatus::Maintenance);
    assert_eq!(updated.mileage_km, 16_500);

    let fetched = repo.get_vehicle_by_id(sedan.id).unwrap().unwrap();
    assert_eq!(fetched.status, VehicleStatus::Maintenance);

    repo.delete_vehicle(sedan.id).unwrap();
    assert!(repo.get_vehicle_by_id(sedan.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_vehicle(sedan.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_plate_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_plate.db");
    let repo = DieselRepository::new(test_db.pool());

    let vehicle = new_vehicle("XY-999", VehicleStatus::Available, VehicleCategory::Van);
    repo.create_vehicle(&vehicle).unwrap();

    let err = repo.create_vehicle(&vehicle).unwrap_err();
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[test]
fn test_updating_missing_vehicle_is_not_found() {
    let test_db = common::TestDb::new("test_update_missing_vehicle.db");
    let repo = DieselRepository::new(test_db.pool());

    let err = repo
        .update_vehicle(
            VehicleId::new(42).unwrap(),
            &UpdateVehicle {
                status: VehicleStatus::Retired,
                mileage_km: 0,
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_vehicle_filters_and_stats() {
    let test_db = common::TestDb::new("test_vehicle_filters.db");
    let repo = DieselRepository::new(test_db.pool());

    for (plate, status, category) in [
        ("AA-001", VehicleStatus::Available, VehicleCategory::Sedan),
        ("AA-002", VehicleStatus::Available, VehicleCategory::Van),
        ("AA-003", VehicleStatus::Leased, VehicleCategory::Van),
        ("BB-001", VehicleStatus::Retired, VehicleCategory::Truck),
    ] {
        repo.create_vehicle(&new_vehicle(plate, status, category))
            .unwrap();
    }

    let (total, items) = repo
        .list_vehicles(VehicleListQuery::new().status(VehicleStatus::Available))
        .unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|v| v.status == VehicleStatus::Available));

    let (total, _) = repo
        .list_vehicles(
            VehicleListQuery::new()
                .status(VehicleStatus::Available)
                .category(VehicleCategory::Van),
        )
        .unwrap();
    assert_eq!(total, 1);

    let (total, items) = repo
        .list_vehicles(VehicleListQuery::new().search("aa-"))
        .unwrap();
    assert_eq!(total, 3);
    assert!(items.iter().all(|v| v.plate_number.starts_with("AA-")));

    // Pagination narrows the items but never the total.
    let (total, items) = repo
        .list_vehicles(VehicleListQuery::new().paginate(PageRequest::new(2, 10).unwrap()))
        .unwrap();
    assert_eq!(total, 4);
    assert!(items.is_empty());

    let stats = repo
        .vehicle_stats(&VehicleCriteria {
            category: Some(VehicleCategory::Van),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stats.total(), 2);
    assert_eq!(stats.get(VehicleStatus::Available), 1);
    assert_eq!(stats.get(VehicleStatus::Leased), 1);
    assert_eq!(stats.get(VehicleStatus::Retired), 0);
}

#[test]
fn test_vehicle_pages_cover_remainder_and_overflow() {
    let test_db = common::TestDb::new("test_vehicle_pages.db");
    let repo = DieselRepository::new(test_db.pool());

    for n in 1..=25 {
        repo.create_vehicle(&new_vehicle(
            &format!("PG-{n:03}"),
            VehicleStatus::Available,
            VehicleCategory::Sedan,
        ))
        .unwrap();
    }
    let page = |page: usize| {
        repo.list_vehicles(VehicleListQuery::new().paginate(PageRequest::new(page, 10).unwrap()))
            .unwrap()
    };

    let (total, first) = page(1);
    assert_eq!(total, 25);
    assert_eq!(first.len(), 10);

    // Last page holds the remainder.
    let (total, last) = page(3);
    assert_eq!(total, 25);
    assert_eq!(last.len(), 5);
    assert!(last.iter().all(|v| !first.iter().any(|f| f.id == v.id)));

    let (total, beyond) = page(4);
    assert_eq!(total, 25);
    assert!(beyond.is_empty());

    let (total, far) = page(usize::MAX);
    assert_eq!(total, 25);
    assert!(far.is_empty());

    let (total, items, stats) = repo
        .vehicle_page(VehicleListQuery::new().paginate(PageRequest::new(usize::MAX, 10).unwrap()))
        .unwrap();
    assert_eq!(total, 25);
    assert!(items.is_empty());
    assert_eq!(stats.get(VehicleStatus::Available), 25);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_wildcards.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_driver(&new_driver("Ann_Lee", "ann@example.com", "LIC-1"))
        .unwrap();
    repo.create_driver(&new_driver("Annxlee", "annx@example.com", "LIC-2"))
        .unwrap();
    repo.create_driver(&new_driver("Bob 100%", "bob@example.com", "LIC-3"))
        .unwrap();

    let (total, items) = repo
        .list_drivers(DriverListQuery::new().search("ann_"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].full_name, "Ann_Lee");

    let (total, _) = repo
        .list_drivers(DriverListQuery::new().search("100%"))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_drivers(DriverListQuery::new().search("   "))
        .unwrap();
    assert_eq!(total, 3);
}

#[test]
fn test_driver_status_changes() {
    let test_db = common::TestDb::new("test_driver_status.db");
    let repo = DieselRepository::new(test_db.pool());

    let driver = repo
        .create_driver(&new_driver("Jane Doe", "Jane@Example.com", "D-100"))
        .unwrap();
    assert_eq!(driver.email, "jane@example.com");
    assert_eq!(driver.status, DriverStatus::Active);

    let driver = repo
        .set_driver_status(driver.id, DriverStatus::Inactive)
        .unwrap();
    assert_eq!(driver.status, DriverStatus::Inactive);

    let (active, _) = repo
        .list_drivers(DriverListQuery::new().status(DriverStatus::Active))
        .unwrap();
    assert_eq!(active, 0);

    assert!(matches!(
        repo.set_driver_status(DriverId::new(999).unwrap(), DriverStatus::Active),
        Err(RepositoryError::NotFound)
    ));

    repo.delete_driver(driver.id).unwrap();
    assert!(repo.get_driver_by_id(driver.id).unwrap().is_none());
}

#[test]
fn test_lease_lifecycle_and_foreign_keys() {
    let test_db = common::TestDb::new("test_lease_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());

    let vehicle = repo
        .create_vehicle(&new_vehicle("LS-001", VehicleStatus::Available, VehicleCategory::Sedan))
        .unwrap();
    let driver = repo
        .create_driver(&new_driver("Max Power", "max@example.com", "D-200"))
        .unwrap();

    let lease = repo
        .create_lease(
            &NewLease::try_new(
                "L-2025-001",
                vehicle.id.get(),
                Some(driver.id.get()),
                "Acme Corp",
                ContractKind::Lease,
                date(2025, 1, 1),
                date(2025, 12, 31),
                45_000,
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(lease.status, LeaseStatus::Draft);

    let lease = repo
        .set_lease_status(lease.id, LeaseStatus::Active)
        .unwrap();
    assert_eq!(lease.status, LeaseStatus::Active);

    let (total, _) = repo
        .list_leases(
            LeaseListQuery::new()
                .status(LeaseStatus::Active)
                .category(ContractKind::Lease)
                .search("acme"),
        )
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_leases(LeaseListQuery::new().category(ContractKind::Rental))
        .unwrap();
    assert_eq!(total, 0);

    // The vehicle is still referenced by the contract.
    assert!(matches!(
        repo.delete_vehicle(vehicle.id),
        Err(RepositoryError::ConstraintViolation(_))
    ));

    let orphan = NewLease::try_new(
        "L-2025-002",
        9_999,
        None,
        "Nobody",
        ContractKind::Rental,
        date(2025, 2, 1),
        date(2025, 2, 7),
        0,
    )
    .unwrap();
    assert!(matches!(
        repo.create_lease(&orphan),
        Err(RepositoryError::ConstraintViolation(_))
    ));

    repo.delete_lease(lease.id).unwrap();
    repo.delete_vehicle(vehicle.id).unwrap();
}

#[test]
fn test_maintenance_filters_by_scheduled_date() {
    let test_db = common::TestDb::new("test_maintenance_dates.db");
    let repo = DieselRepository::new(test_db.pool());

    let vehicle = repo
        .create_vehicle(&new_vehicle("MT-001", VehicleStatus::Available, VehicleCategory::Truck))
        .unwrap();

    for (day, service) in [
        (5, ServiceType::OilChange),
        (15, ServiceType::Brakes),
        (25, ServiceType::Inspection),
    ] {
        repo.create_maintenance(
            &NewMaintenanceRecord::try_new(
                vehicle.id.get(),
                service,
                date(2025, 6, day),
                "QuickFix",
                "Routine work",
                12_000,
            )
            .unwrap(),
        )
        .unwrap();
    }

    let range = DateRange::new(Some(date(2025, 6, 10)), Some(date(2025, 6, 25))).unwrap();
    let (total, items) = repo
        .list_maintenance(MaintenanceListQuery::new().date_range(range))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].scheduled_on, date(2025, 6, 25));

    let record = repo
        .set_maintenance_status(items[0].id, MaintenanceStatus::Completed)
        .unwrap();
    assert_eq!(record.status, MaintenanceStatus::Completed);

    let (total, _) = repo
        .list_maintenance(MaintenanceListQuery::new().status(MaintenanceStatus::Scheduled))
        .unwrap();
    assert_eq!(total, 2);

    repo.delete_maintenance(record.id).unwrap();
    assert!(repo.get_maintenance_by_id(record.id).unwrap().is_none());
}

#[test]
fn test_audit_log_listing_and_stats() {
    let test_db = common::TestDb::new("test_audit_logs.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut critical = NewAuditLog::info(AuditCategory::System, "backup", "database")
        .details("Backup failed");
    critical.level = AuditLevel::Critical;
    repo.record_audit_log(&critical).unwrap();
    repo.record_audit_log(
        &NewAuditLog::info(AuditCategory::Vehicle, "create", "vehicle AB-123").actor("ops"),
    )
    .unwrap();
    repo.record_audit_log(&NewAuditLog::info(AuditCategory::Driver, "toggle_status", "driver 1"))
        .unwrap();

    let (total, items) = repo.list_audit_logs(AuditLogListQuery::new()).unwrap();
    assert_eq!(total, 3);
    assert_eq!(items[0].action, "toggle_status");

    let (total, items) = repo
        .list_audit_logs(AuditLogListQuery::new().status(AuditLevel::Critical))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].details, "Backup failed");

    let (total, _) = repo
        .list_audit_logs(AuditLogListQuery::new().search("AB-123"))
        .unwrap();
    assert_eq!(total, 1);

    let today = Utc::now().date_naive();
    let (total, _) = repo
        .list_audit_logs(
            AuditLogListQuery::new().date_range(DateRange::new(Some(today), Some(today)).unwrap()),
        )
        .unwrap();
    assert_eq!(total, 3);

    let stats = repo.audit_log_stats(&AuditLogCriteria::default()).unwrap();
    assert_eq!(stats.total(), 3);
    assert_eq!(stats.get(AuditLevel::Critical), 1);
    assert_eq!(stats.get(AuditLevel::Info), 2);
}
