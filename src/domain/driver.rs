use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DriverEmail, DriverId, DriverStatus, LicenseNumber, PersonName, PhoneNumber,
    TypeConstraintError, Uncategorized,
};
use crate::query::engine::Filterable;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub status: DriverStatus,
    pub hired_on: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Driver {
    /// Whether the driving license has expired on the given day.
    pub fn license_expired(&self, today: NaiveDate) -> bool {
        self.license_expiry < today
    }
}

impl Filterable for Driver {
    type Status = DriverStatus;
    type Category = Uncategorized;

    fn status(&self) -> DriverStatus {
        self.status
    }

    fn category(&self) -> Option<Uncategorized> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.full_name.as_str(),
            self.email.as_str(),
            self.license_number.as_str(),
        ];
        if let Some(phone) = &self.phone {
            fields.push(phone.as_str());
        }
        fields
    }

    fn filter_date(&self) -> NaiveDate {
        self.hired_on
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.hired_on.and_time(chrono::NaiveTime::MIN), self.id.get())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewDriver {
    pub full_name: PersonName,
    pub email: DriverEmail,
    pub phone: Option<PhoneNumber>,
    pub license_number: LicenseNumber,
    pub license_expiry: NaiveDate,
    pub status: DriverStatus,
    pub hired_on: NaiveDate,
}

impl NewDriver {
    /// Validates and normalizes the raw driver values.
    pub fn try_new(
        full_name: &str,
        email: &str,
        phone: Option<&str>,
        license_number: &str,
        license_expiry: NaiveDate,
        hired_on: NaiveDate,
    ) -> Result<Self, TypeConstraintError> {
        let phone = match phone.map(str::trim).filter(|p| !p.is_empty()) {
            Some(phone) => Some(PhoneNumber::new(phone)?),
            None => None,
        };

        Ok(Self {
            full_name: PersonName::new(full_name)?,
            email: DriverEmail::new(email)?,
            phone,
            license_number: LicenseNumber::new(license_number.trim().to_uppercase())?,
            license_expiry,
            status: DriverStatus::Active,
            hired_on,
        })
    }
}
