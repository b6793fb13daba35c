use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Description, MaintenanceId, MaintenanceStatus, ServiceType, TypeConstraintError, VehicleId,
};
use crate::query::engine::Filterable;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub service_type: ServiceType,
    pub status: MaintenanceStatus,
    pub scheduled_on: NaiveDate,
    pub vendor: String,
    pub description: String,
    /// Cost in cents.
    pub cost: i64,
    pub created_at: NaiveDateTime,
}

impl Filterable for MaintenanceRecord {
    type Status = MaintenanceStatus;
    type Category = ServiceType;

    fn status(&self) -> MaintenanceStatus {
        self.status
    }

    fn category(&self) -> Option<ServiceType> {
        Some(self.service_type)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.vendor.as_str(), self.description.as_str()]
    }

    fn filter_date(&self) -> NaiveDate {
        self.scheduled_on
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (
            self.scheduled_on.and_time(chrono::NaiveTime::MIN),
            self.id.get(),
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: VehicleId,
    pub service_type: ServiceType,
    pub status: MaintenanceStatus,
    pub scheduled_on: NaiveDate,
    pub vendor: String,
    pub description: Description,
    pub cost: i64,
}

impl NewMaintenanceRecord {
    pub fn try_new(
        vehicle_id: i32,
        service_type: ServiceType,
        scheduled_on: NaiveDate,
        vendor: &str,
        description: &str,
        cost: i64,
    ) -> Result<Self, TypeConstraintError> {
        if cost < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "cost cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            vehicle_id: VehicleId::new(vehicle_id)?,
            service_type,
            status: MaintenanceStatus::Scheduled,
            scheduled_on,
            vendor: vendor.trim().to_string(),
            description: Description::new(description)?,
            cost,
        })
    }
}
