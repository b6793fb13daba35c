use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    PlateNumber, TypeConstraintError, VehicleCategory, VehicleId, VehicleStatus,
};
use crate::query::engine::Filterable;

/// Fleet vehicle as shown on the vehicles screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub mileage_km: i32,
    pub status: VehicleStatus,
    pub category: VehicleCategory,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Vehicle {
    /// `"Make Model (PLATE)"`, used by the vehicle pickers.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.plate_number)
    }
}

impl Filterable for Vehicle {
    type Status = VehicleStatus;
    type Category = VehicleCategory;

    fn status(&self) -> VehicleStatus {
        self.status
    }

    fn category(&self) -> Option<VehicleCategory> {
        Some(self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.plate_number.as_str(),
            self.make.as_str(),
            self.model.as_str(),
            self.vin.as_str(),
        ]
    }

    fn filter_date(&self) -> NaiveDate {
        self.created_at.date()
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.created_at, self.id.get())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewVehicle {
    pub plate_number: PlateNumber,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub mileage_km: i32,
    pub status: VehicleStatus,
    pub category: VehicleCategory,
}

impl NewVehicle {
    /// Validates the raw values coming from a form or API payload.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        plate_number: &str,
        make: &str,
        model: &str,
        year: i32,
        vin: &str,
        mileage_km: i32,
        status: VehicleStatus,
        category: VehicleCategory,
    ) -> Result<Self, TypeConstraintError> {
        let next_year = Utc::now().year() + 1;
        if !(1950..=next_year).contains(&year) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "year {year} is out of range"
            )));
        }
        if mileage_km < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "mileage cannot be negative".to_string(),
            ));
        }
        let make = make.trim();
        let model = model.trim();
        if make.is_empty() || model.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        Ok(Self {
            plate_number: PlateNumber::new(plate_number.trim().to_uppercase())?,
            make: make.to_string(),
            model: model.to_string(),
            year,
            vin: vin.trim().to_uppercase(),
            mileage_km,
            status,
            category,
        })
    }
}

/// Fields an operator may change after registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateVehicle {
    pub status: VehicleStatus,
    pub mileage_km: i32,
}
