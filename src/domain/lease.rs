use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ContractKind, ContractNumber, DriverId, LeaseId, LeaseStatus, PersonName,
    TypeConstraintError, VehicleId,
};
use crate::query::engine::Filterable;

/// Lease or rental contract binding a vehicle to a customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lease {
    pub id: LeaseId,
    pub contract_number: String,
    pub vehicle_id: VehicleId,
    pub driver_id: Option<DriverId>,
    pub customer_name: String,
    pub kind: ContractKind,
    pub status: LeaseStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Monthly rate in cents.
    pub monthly_rate: i64,
    pub created_at: NaiveDateTime,
}

impl Lease {
    /// Contract length in whole days, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Filterable for Lease {
    type Status = LeaseStatus;
    type Category = ContractKind;

    fn status(&self) -> LeaseStatus {
        self.status
    }

    fn category(&self) -> Option<ContractKind> {
        Some(self.kind)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.contract_number.as_str(), self.customer_name.as_str()]
    }

    fn filter_date(&self) -> NaiveDate {
        self.start_date
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.start_date.and_time(chrono::NaiveTime::MIN), self.id.get())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLease {
    pub contract_number: ContractNumber,
    pub vehicle_id: VehicleId,
    pub driver_id: Option<DriverId>,
    pub customer_name: PersonName,
    pub kind: ContractKind,
    pub status: LeaseStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rate: i64,
}

impl NewLease {
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        contract_number: &str,
        vehicle_id: i32,
        driver_id: Option<i32>,
        customer_name: &str,
        kind: ContractKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_rate: i64,
    ) -> Result<Self, TypeConstraintError> {
        if end_date < start_date {
            return Err(TypeConstraintError::InvalidDateRange);
        }
        if monthly_rate < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "monthly rate cannot be negative".to_string(),
            ));
        }
        let driver_id = driver_id.map(DriverId::new).transpose()?;

        Ok(Self {
            contract_number: ContractNumber::new(contract_number.trim().to_uppercase())?,
            vehicle_id: VehicleId::new(vehicle_id)?,
            driver_id,
            customer_name: PersonName::new(customer_name)?,
            kind,
            status: LeaseStatus::Draft,
            start_date,
            end_date,
            monthly_rate,
        })
    }
}
