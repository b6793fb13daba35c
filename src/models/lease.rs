use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    lease::{Lease as DomainLease, NewLease as DomainNewLease},
    types::{Choice, DriverId, LeaseId, TypeConstraintError, VehicleId},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Lease {
    pub id: i32,
    pub contract_number: String,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub customer_name: String,
    pub kind: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rate: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leases)]
pub struct NewLease<'a> {
    pub contract_number: &'a str,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub customer_name: &'a str,
    pub kind: &'a str,
    pub status: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rate: i64,
}

impl TryFrom<Lease> for DomainLease {
    type Error = TypeConstraintError;

    fn try_from(lease: Lease) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeaseId::new(lease.id)?,
            contract_number: lease.contract_number,
            vehicle_id: VehicleId::new(lease.vehicle_id)?,
            driver_id: lease.driver_id.map(DriverId::new).transpose()?,
            customer_name: lease.customer_name,
            kind: lease.kind.parse()?,
            status: lease.status.parse()?,
            start_date: lease.start_date,
            end_date: lease.end_date,
            monthly_rate: lease.monthly_rate,
            created_at: lease.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewLease> for NewLease<'a> {
    fn from(lease: &'a DomainNewLease) -> Self {
        Self {
            contract_number: lease.contract_number.as_str(),
            vehicle_id: lease.vehicle_id.get(),
            driver_id: lease.driver_id.map(DriverId::get),
            customer_name: lease.customer_name.as_str(),
            kind: lease.kind.as_str(),
            status: lease.status.as_str(),
            start_date: lease.start_date,
            end_date: lease.end_date,
            monthly_rate: lease.monthly_rate,
        }
    }
}
