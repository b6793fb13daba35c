//! Repository backed by a remote fleet REST API.
//!
//! Every call is blocking; run it on the blocking pool. Reads are retried with
//! the configured [`RetryPolicy`]; writes are sent once.

use std::time::Duration;

use log::debug;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::audit_log::{AuditLog, NewAuditLog};
use crate::domain::driver::{Driver, NewDriver};
use crate::domain::lease::{Lease, NewLease};
use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::types::{
    AuditLevel, Choice, DriverId, DriverStatus, LeaseId, LeaseStatus, MaintenanceId,
    MaintenanceStatus, VehicleId, VehicleStatus,
};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::models::config::UpstreamConfig;
use crate::query::ListQuery;
use crate::query::criteria::FilterCriteria;
use crate::query::stats::StatusCounts;
use crate::repository::envelope::{decode_list, unwrap_single};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DriverListQuery,
    DriverReader, DriverWriter, LeaseListQuery, LeaseReader, LeaseWriter, MaintenanceListQuery,
    MaintenanceReader, MaintenanceWriter, VehicleCriteria, VehicleListQuery, VehicleReader,
    VehicleWriter,
};
use crate::services::retry::RetryPolicy;

const MAX_ERROR_BODY: usize = 300;

/// Query string understood by the upstream list endpoints.
fn list_params<S: Choice, C: Choice>(query: &ListQuery<S, C>) -> Vec<(&'static str, String)> {
    let mut params = criteria_params(&query.criteria);
    if let Some(page) = query.pagination {
        params.push(("page", page.page.to_string()));
        params.push(("pageSize", page.per_page.to_string()));
    }
    params
}

fn criteria_params<S: Choice, C: Choice>(
    criteria: &FilterCriteria<S, C>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = criteria.status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(category) = criteria.category {
        params.push(("category", category.as_str().to_string()));
    }
    if let Some(search) = &criteria.search {
        params.push(("search", search.clone()));
    }
    if let Some(from) = criteria.date_range.from {
        params.push(("from", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = criteria.date_range.to {
        params.push(("to", to.format("%Y-%m-%d").to_string()));
    }
    params
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn check(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut message = response.text().unwrap_or_default();
    if message.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| message.is_char_boundary(*i))
            .unwrap_or(0);
        message.truncate(cut);
    }
    Err(RepositoryError::Upstream {
        status: status.as_u16(),
        message,
    })
}

fn read_body(response: Response) -> RepositoryResult<Value> {
    let text = response.text()?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| RepositoryError::Unexpected(format!("Malformed upstream response: {e}")))
}

/// Blocking client for the upstream fleet API.
pub struct HttpRepository {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpRepository {
    pub fn new(config: &UpstreamConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::ConnectionError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retry: RetryPolicy::from(&config.retry),
        })
    }

    /// GET with retries. A 404 yields `None`.
    fn fetch(&self, path: &str, params: &[(&str, String)]) -> RepositoryResult<Option<Value>> {
        let url = join_url(&self.base_url, path);
        self.retry.run(&format!("GET {path}"), || {
            debug!("GET {url} {params:?}");
            let response = self
                .client
                .get(&url)
                .header(ACCEPT, "application/json")
                .query(params)
                .send()?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            read_body(check(response)?).map(Some)
        })
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RepositoryResult<Value> {
        let url = join_url(&self.base_url, path);
        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        read_body(check(request.send()?)?)
    }

    fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
        params: &[(&str, String)],
    ) -> RepositoryResult<(usize, Vec<T>)> {
        match self.fetch(path, params)? {
            Some(body) => decode_list(body, resource),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn get_one<T: DeserializeOwned>(&self, path: &str, name: &str) -> RepositoryResult<Option<T>> {
        self.fetch(path, &[])?
            .map(|body| unwrap_single(body, name))
            .transpose()
    }

    fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        name: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        unwrap_single(self.send(Method::POST, path, Some(body))?, name)
    }

    fn patch_status<T: DeserializeOwned>(
        &self,
        path: &str,
        name: &str,
        status: &str,
    ) -> RepositoryResult<T> {
        let body = json!({ "status": status });
        unwrap_single(self.send(Method::PATCH, path, Some(&body))?, name)
    }

    fn delete(&self, path: &str) -> RepositoryResult<()> {
        self.send::<()>(Method::DELETE, path, None).map(|_| ())
    }
}

impl VehicleReader for HttpRepository {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        self.get_one(&format!("vehicles/{id}"), "vehicle")
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        self.list("vehicles", "vehicles", &list_params(&query))
    }

    fn vehicle_stats(
        &self,
        criteria: &VehicleCriteria,
    ) -> RepositoryResult<StatusCounts<VehicleStatus>> {
        let (_, vehicles) =
            self.list::<Vehicle>("vehicles", "vehicles", &criteria_params(criteria))?;
        Ok(StatusCounts::tally(&vehicles))
    }
}

impl VehicleWriter for HttpRepository {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        self.create("vehicles", "vehicle", new_vehicle)
    }

    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle> {
        let body = self.send(Method::PUT, &format!("vehicles/{id}"), Some(updates))?;
        unwrap_single(body, "vehicle")
    }

    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        self.delete(&format!("vehicles/{id}"))
    }
}

impl DriverReader for HttpRepository {
    fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>> {
        self.get_one(&format!("drivers/{id}"), "driver")
    }

    fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)> {
        self.list("drivers", "drivers", &list_params(&query))
    }
}

impl DriverWriter for HttpRepository {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver> {
        self.create("drivers", "driver", new_driver)
    }

    fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver> {
        self.patch_status(&format!("drivers/{id}/status"), "driver", status.as_str())
    }

    fn delete_driver(&self, id: DriverId) -> RepositoryResult<()> {
        self.delete(&format!("drivers/{id}"))
    }
}

impl LeaseReader for HttpRepository {
    fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>> {
        self.get_one(&format!("leases/{id}"), "lease")
    }

    fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)> {
        self.list("leases", "leases", &list_params(&query))
    }
}

impl LeaseWriter for HttpRepository {
    fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease> {
        self.create("leases", "lease", new_lease)
    }

    fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease> {
        self.patch_status(&format!("leases/{id}/status"), "lease", status.as_str())
    }

    fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()> {
        self.delete(&format!("leases/{id}"))
    }
}

impl MaintenanceReader for HttpRepository {
    fn get_maintenance_by_id(
        &self,
        id: MaintenanceId,
    ) -> RepositoryResult<Option<MaintenanceRecord>> {
        self.get_one(&format!("maintenance/{id}"), "maintenance")
    }

    fn list_maintenance(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)> {
        self.list("maintenance", "maintenance", &list_params(&query))
    }
}

impl MaintenanceWriter for HttpRepository {
    fn create_maintenance(
        &self,
        new_record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        self.create("maintenance", "maintenance", new_record)
    }

    fn set_maintenance_status(
        &self,
        id: MaintenanceId,
        status: MaintenanceStatus,
    ) -> RepositoryResult<MaintenanceRecord> {
        self.patch_status(
            &format!("maintenance/{id}/status"),
            "maintenance",
            status.as_str(),
        )
    }

    fn delete_maintenance(&self, id: MaintenanceId) -> RepositoryResult<()> {
        self.delete(&format!("maintenance/{id}"))
    }
}

impl AuditLogReader for HttpRepository {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)> {
        self.list("audit/logs", "logs", &list_params(&query))
    }

    fn audit_log_stats(
        &self,
        criteria: &AuditLogCriteria,
    ) -> RepositoryResult<StatusCounts<AuditLevel>> {
        let (_, logs) = self.list::<AuditLog>("audit/logs", "logs", &criteria_params(criteria))?;
        Ok(StatusCounts::tally(&logs))
    }
}

impl AuditLogWriter for HttpRepository {
    fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        self.create("audit/logs", "log", entry)
    }
}
