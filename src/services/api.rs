//! Services behind the `/api/v1` JSON endpoints.

use serde::Deserialize;

use crate::domain::audit_log::AuditLog;
use crate::domain::driver::Driver;
use crate::domain::lease::Lease;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::types::{
    AuditCategory, AuditLevel, Choice, ContractKind, DriverStatus, LeaseStatus, MaintenanceStatus,
    ServiceType, Uncategorized, VehicleCategory, VehicleStatus,
};
use crate::domain::vehicle::Vehicle;
use crate::dto::api::ListResponse;
use crate::query::pagination::PageInfo;
use crate::query::state::{ListParams, ListState};
use crate::query::stats::StatusCounts;
use crate::repository::{
    AuditLogReader, AuditLogWriter, DriverReader, DriverWriter, LeaseReader, MaintenanceReader,
    VehicleReader,
};
use crate::services::{ServiceResult, drivers, list_state};

/// Body of `PATCH /api/v1/drivers/{id}/status`. Without `status` the
/// current status is toggled.
#[derive(Debug, Default, Deserialize)]
pub struct DriverStatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

fn respond<S: Choice, C: Choice, T, St>(
    state: &ListState<S, C>,
    total: usize,
    items: Vec<T>,
) -> ListResponse<T, St> {
    ListResponse::new(items, PageInfo::new(state.page(), total))
}

pub fn list_vehicles<R>(
    repo: &R,
    params: &ListParams,
) -> ServiceResult<ListResponse<Vehicle, StatusCounts<VehicleStatus>>>
where
    R: VehicleReader + ?Sized,
{
    let state = list_state::<VehicleStatus, VehicleCategory>(params)?;
    let (total, vehicles, stats) = repo.vehicle_page(state.to_query())?;
    Ok(respond(&state, total, vehicles).with_stats(stats))
}

pub fn list_drivers<R>(repo: &R, params: &ListParams) -> ServiceResult<ListResponse<Driver>>
where
    R: DriverReader + ?Sized,
{
    let state = list_state::<DriverStatus, Uncategorized>(params)?;
    let (total, drivers) = repo.list_drivers(state.to_query())?;
    Ok(respond(&state, total, drivers))
}

pub fn list_leases<R>(repo: &R, params: &ListParams) -> ServiceResult<ListResponse<Lease>>
where
    R: LeaseReader + ?Sized,
{
    let state = list_state::<LeaseStatus, ContractKind>(params)?;
    let (total, leases) = repo.list_leases(state.to_query())?;
    Ok(respond(&state, total, leases))
}

pub fn list_maintenance<R>(
    repo: &R,
    params: &ListParams,
) -> ServiceResult<ListResponse<MaintenanceRecord>>
where
    R: MaintenanceReader + ?Sized,
{
    let state = list_state::<MaintenanceStatus, ServiceType>(params)?;
    let (total, records) = repo.list_maintenance(state.to_query())?;
    Ok(respond(&state, total, records))
}

pub fn list_audit_logs<R>(
    repo: &R,
    params: &ListParams,
) -> ServiceResult<ListResponse<AuditLog, StatusCounts<AuditLevel>>>
where
    R: AuditLogReader + ?Sized,
{
    let state = list_state::<AuditLevel, AuditCategory>(params)?;
    let (total, logs, stats) = repo.audit_log_page(state.to_query())?;
    Ok(respond(&state, total, logs).with_stats(stats))
}

pub fn update_driver_status<R>(
    repo: &R,
    driver_id: i32,
    payload: DriverStatusPayload,
) -> ServiceResult<Driver>
where
    R: DriverReader + DriverWriter + AuditLogWriter + ?Sized,
{
    let status = payload
        .status
        .as_deref()
        .map(str::parse::<DriverStatus>)
        .transpose()?;
    drivers::change_driver_status(repo, driver_id, status)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::repository::memory::MemoryRepository;
    use crate::repository::mock_data::MOCK_AUDIT_LOGS;
    use crate::services::ServiceError;

    #[test]
    fn audit_log_response_has_normalized_shape() {
        let repo = MemoryRepository::with_mock_data().unwrap();
        let params = ListParams {
            per_page: Some("50".into()),
            page: Some("4".into()),
            ..ListParams::default()
        };

        let response = list_audit_logs(&repo, &params).unwrap();
        let json: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(json["total"], MOCK_AUDIT_LOGS);
        assert_eq!(json["page"], 4);
        assert_eq!(json["per_page"], 50);
        assert_eq!(json["total_pages"], 4);
        assert_eq!(json["items"].as_array().unwrap().len(), 50);
        assert_eq!(json["stats"]["total"], MOCK_AUDIT_LOGS);
    }

    #[test]
    fn lists_without_stats_omit_the_key() {
        let repo = MemoryRepository::with_mock_data().unwrap();
        let json = serde_json::to_value(list_leases(&repo, &ListParams::default()).unwrap()).unwrap();
        assert!(json.get("stats").is_none());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let repo = MemoryRepository::with_mock_data().unwrap();
        let params = ListParams {
            page: Some("99".into()),
            ..ListParams::default()
        };
        let response = list_vehicles(&repo, &params).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.page, 99);
    }

    #[test]
    fn explicit_status_is_applied_and_unknown_rejected() {
        let repo = MemoryRepository::with_mock_data().unwrap();

        let driver = update_driver_status(
            &repo,
            3,
            DriverStatusPayload {
                status: Some("inactive".into()),
            },
        )
        .unwrap();
        assert_eq!(driver.status, DriverStatus::Inactive);

        let err = update_driver_status(
            &repo,
            3,
            DriverStatusPayload {
                status: Some("suspended".into()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::TypeConstraint(_)));
    }
}
