use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{VehicleCategory, VehicleStatus};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle};
use crate::forms::{FormError, parse_choice};

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering a vehicle.
pub struct AddVehicleForm {
    #[validate(length(min = 1, max = 16))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 64))]
    pub make: String,
    #[validate(length(min = 1, max = 64))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    #[validate(length(min = 11, max = 17))]
    pub vin: String,
    #[validate(range(min = 0))]
    pub mileage_km: i32,
    pub status: String,
    pub category: String,
}

impl TryFrom<AddVehicleForm> for NewVehicle {
    type Error = FormError;

    fn try_from(form: AddVehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status: VehicleStatus = parse_choice(&form.status, "status")?;
        let category: VehicleCategory = parse_choice(&form.category, "category")?;

        Ok(NewVehicle::try_new(
            &form.plate_number,
            &form.make,
            &form.model,
            form.year,
            &form.vin,
            form.mileage_km,
            status,
            category,
        )?)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for the status / odometer update on a vehicle row.
pub struct UpdateVehicleForm {
    pub status: String,
    #[validate(range(min = 0))]
    pub mileage_km: i32,
}

impl TryFrom<UpdateVehicleForm> for UpdateVehicle {
    type Error = FormError;

    fn try_from(form: UpdateVehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateVehicle {
            status: parse_choice(&form.status, "status")?,
            mileage_km: form.mileage_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddVehicleForm {
        AddVehicleForm {
            plate_number: "ab-123".into(),
            make: "Ford".into(),
            model: "Transit".into(),
            year: 2022,
            vin: "wf0xxttg0000001".into(),
            mileage_km: 1200,
            status: "available".into(),
            category: "van".into(),
        }
    }

    #[test]
    fn valid_form_converts() {
        let vehicle = NewVehicle::try_from(form()).unwrap();
        assert_eq!(vehicle.plate_number.as_str(), "AB-123");
        assert_eq!(vehicle.category, VehicleCategory::Van);
    }

    #[test]
    fn short_vin_is_rejected() {
        let mut form = form();
        form.vin = "123".into();
        assert!(matches!(
            NewVehicle::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut form = form();
        form.category = "boat".into();
        assert!(matches!(
            NewVehicle::try_from(form),
            Err(FormError::InvalidChoice("category"))
        ));
    }
}
