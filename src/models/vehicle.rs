use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    types::{TypeConstraintError, VehicleId},
    vehicle::{NewVehicle as DomainNewVehicle, Vehicle as DomainVehicle},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::vehicle::Vehicle`].
pub struct Vehicle {
    pub id: i32,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub mileage_km: i32,
    pub status: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
/// Insertable form of [`Vehicle`].
pub struct NewVehicle<'a> {
    pub plate_number: &'a str,
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub vin: &'a str,
    pub mileage_km: i32,
    pub status: &'a str,
    pub category: &'a str,
}

impl TryFrom<Vehicle> for DomainVehicle {
    type Error = TypeConstraintError;

    fn try_from(vehicle: Vehicle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VehicleId::new(vehicle.id)?,
            plate_number: vehicle.plate_number,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            mileage_km: vehicle.mileage_km,
            status: vehicle.status.parse()?,
            category: vehicle.category.parse()?,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewVehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a DomainNewVehicle) -> Self {
        use crate::domain::types::Choice;

        Self {
            plate_number: vehicle.plate_number.as_str(),
            make: vehicle.make.as_str(),
            model: vehicle.model.as_str(),
            year: vehicle.year,
            vin: vehicle.vin.as_str(),
            mileage_km: vehicle.mileage_km,
            status: vehicle.status.as_str(),
            category: vehicle.category.as_str(),
        }
    }
}
