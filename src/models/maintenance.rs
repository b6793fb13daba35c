use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    maintenance::{
        MaintenanceRecord as DomainMaintenanceRecord,
        NewMaintenanceRecord as DomainNewMaintenanceRecord,
    },
    types::{Choice, MaintenanceId, TypeConstraintError, VehicleId},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::maintenance_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub service_type: String,
    pub status: String,
    pub scheduled_on: NaiveDate,
    pub vendor: String,
    pub description: String,
    pub cost: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct NewMaintenanceRecord<'a> {
    pub vehicle_id: i32,
    pub service_type: &'a str,
    pub status: &'a str,
    pub scheduled_on: NaiveDate,
    pub vendor: &'a str,
    pub description: &'a str,
    pub cost: i64,
}

impl TryFrom<MaintenanceRecord> for DomainMaintenanceRecord {
    type Error = TypeConstraintError;

    fn try_from(record: MaintenanceRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MaintenanceId::new(record.id)?,
            vehicle_id: VehicleId::new(record.vehicle_id)?,
            service_type: record.service_type.parse()?,
            status: record.status.parse()?,
            scheduled_on: record.scheduled_on,
            vendor: record.vendor,
            description: record.description,
            cost: record.cost,
            created_at: record.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewMaintenanceRecord> for NewMaintenanceRecord<'a> {
    fn from(record: &'a DomainNewMaintenanceRecord) -> Self {
        Self {
            vehicle_id: record.vehicle_id.get(),
            service_type: record.service_type.as_str(),
            status: record.status.as_str(),
            scheduled_on: record.scheduled_on,
            vendor: record.vendor.as_str(),
            description: record.description.as_str(),
            cost: record.cost,
        }
    }
}
