use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    driver::{Driver as DomainDriver, NewDriver as DomainNewDriver},
    types::{Choice, DriverId, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::drivers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::driver::Driver`].
pub struct Driver {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub status: String,
    pub hired_on: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::drivers)]
pub struct NewDriver<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub license_number: &'a str,
    pub license_expiry: NaiveDate,
    pub status: &'a str,
    pub hired_on: NaiveDate,
}

impl TryFrom<Driver> for DomainDriver {
    type Error = TypeConstraintError;

    fn try_from(driver: Driver) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DriverId::new(driver.id)?,
            full_name: driver.full_name,
            email: driver.email,
            phone: driver.phone,
            license_number: driver.license_number,
            license_expiry: driver.license_expiry,
            status: driver.status.parse()?,
            hired_on: driver.hired_on,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDriver> for NewDriver<'a> {
    fn from(driver: &'a DomainNewDriver) -> Self {
        Self {
            full_name: driver.full_name.as_str(),
            email: driver.email.as_str(),
            phone: driver.phone.as_ref().map(|p| p.as_str()),
            license_number: driver.license_number.as_str(),
            license_expiry: driver.license_expiry,
            status: driver.status.as_str(),
            hired_on: driver.hired_on,
        }
    }
}
