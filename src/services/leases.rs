use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::audit_log::NewAuditLog;
use crate::domain::lease::{Lease, NewLease};
use crate::domain::types::{AuditCategory, ContractKind, DriverStatus, LeaseId, LeaseStatus, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::dto::leases::{LeaseRow, LeasesPageData, PickerOption};
use crate::dto::list::{ChoiceOption, ListView};
use crate::forms::StatusForm;
use crate::forms::leases::AddLeaseForm;
use crate::query::state::ListParams;
use crate::read_model::VehicleReadModel;
use crate::repository::{
    AuditLogWriter, DriverListQuery, DriverReader, LeaseReader, LeaseWriter, VehicleReader,
};
use crate::services::{ServiceError, ServiceResult, list_state, record_audit};

/// Vehicle pickers read the shared snapshot; a failed refresh leaves them
/// empty instead of failing the page.
pub(crate) fn vehicle_snapshot<R>(repo: &R, read_model: &VehicleReadModel) -> Arc<Vec<Vehicle>>
where
    R: VehicleReader + ?Sized,
{
    read_model.get_or_refresh(repo).unwrap_or_default()
}

pub(crate) fn vehicle_options(vehicles: &[Vehicle]) -> Vec<PickerOption> {
    vehicles
        .iter()
        .map(|vehicle| PickerOption {
            id: vehicle.id.get(),
            label: vehicle.display_name(),
        })
        .collect()
}

pub(crate) fn vehicle_names(vehicles: &[Vehicle]) -> HashMap<VehicleId, String> {
    vehicles
        .iter()
        .map(|vehicle| (vehicle.id, vehicle.display_name()))
        .collect()
}

pub fn load_leases_page<R>(
    repo: &R,
    read_model: &VehicleReadModel,
    params: &ListParams,
) -> ServiceResult<LeasesPageData>
where
    R: LeaseReader + DriverReader + VehicleReader + ?Sized,
{
    let state = list_state::<LeaseStatus, ContractKind>(params)?;
    let (total, leases) = repo.list_leases(state.to_query())?;

    let vehicles = vehicle_snapshot(repo, read_model);
    let names = vehicle_names(&vehicles);
    let rows = leases
        .into_iter()
        .map(|lease| LeaseRow {
            vehicle: names.get(&lease.vehicle_id).cloned(),
            lease,
        })
        .collect();

    let (_, drivers) = repo.list_drivers(DriverListQuery::new().status(DriverStatus::Active))?;
    let drivers = drivers
        .iter()
        .map(|driver| PickerOption {
            id: driver.id.get(),
            label: driver.full_name.clone(),
        })
        .collect();

    Ok(LeasesPageData {
        list: ListView::new(&state, total, rows),
        vehicles: vehicle_options(&vehicles),
        drivers,
        lease_statuses: ChoiceOption::all::<LeaseStatus>(),
    })
}

pub fn add_lease<R>(repo: &R, form: AddLeaseForm) -> ServiceResult<Lease>
where
    R: LeaseWriter + AuditLogWriter + ?Sized,
{
    let new_lease = NewLease::try_from(form).map_err(|err| {
        log::error!("Failed to validate lease form: {err}");
        ServiceError::from(err)
    })?;

    let lease = repo.create_lease(&new_lease)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Lease, "lease.create", lease.contract_number.as_str())
            .details(format!("vehicle/{}", lease.vehicle_id)),
    );
    Ok(lease)
}

pub fn set_lease_status<R>(repo: &R, lease_id: i32, form: &StatusForm) -> ServiceResult<Lease>
where
    R: LeaseWriter + AuditLogWriter + ?Sized,
{
    let id = LeaseId::new(lease_id)?;
    let status: LeaseStatus = form.parse()?;

    let lease = repo.set_lease_status(id, status)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Lease, "lease.status", lease.contract_number.as_str())
            .details(format!("status={status}")),
    );
    Ok(lease)
}

pub fn delete_lease<R>(repo: &R, lease_id: i32) -> ServiceResult<()>
where
    R: LeaseWriter + AuditLogWriter + ?Sized,
{
    let id = LeaseId::new(lease_id)?;
    repo.delete_lease(id)?;
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Lease, "lease.delete", format!("lease/{id}")),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Choice;
    use crate::repository::LeaseListQuery;
    use crate::repository::memory::MemoryRepository;

    #[test]
    fn rows_carry_vehicle_names_from_the_snapshot() {
        let repo = MemoryRepository::with_mock_data().unwrap();
        let read_model = VehicleReadModel::new();

        let data = load_leases_page(&repo, &read_model, &ListParams::default()).unwrap();

        assert!(read_model.snapshot().is_some());
        assert!(!data.vehicles.is_empty());
        assert!(data.list.records.items.iter().all(|row| row.vehicle.is_some()));
        assert_eq!(data.lease_statuses.len(), LeaseStatus::all().len());
    }

    #[test]
    fn status_change_accepts_known_values_only() {
        let repo = MemoryRepository::with_mock_data().unwrap();

        let lease = set_lease_status(&repo, 1, &StatusForm { status: "terminated".into() }).unwrap();
        assert_eq!(lease.status, LeaseStatus::Terminated);
        let (total, _) = repo
            .list_leases(LeaseListQuery::new().status(LeaseStatus::Terminated))
            .unwrap();
        assert!(total >= 1);

        assert!(matches!(
            set_lease_status(&repo, 1, &StatusForm { status: "paused".into() }),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn lease_for_unknown_vehicle_is_rejected() {
        let repo = MemoryRepository::new();
        let form = AddLeaseForm {
            contract_number: "L-100".into(),
            vehicle_id: 42,
            driver_id: String::new(),
            customer_name: "Acme".into(),
            kind: "rental".into(),
            start_date: "2025-01-01".into(),
            end_date: "2025-01-31".into(),
            monthly_rate: 450.0,
        };

        assert!(add_lease(&repo, form).is_err());
    }
}
