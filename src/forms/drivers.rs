use serde::Deserialize;
use validator::Validate;

use crate::domain::driver::NewDriver;
use crate::forms::{FormError, parse_date};

#[derive(Debug, Deserialize, Validate)]
/// Form data for hiring a driver.
pub struct AddDriverForm {
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 4, max = 32))]
    pub license_number: String,
    pub license_expiry: String,
    pub hired_on: String,
}

impl TryFrom<AddDriverForm> for NewDriver {
    type Error = FormError;

    fn try_from(form: AddDriverForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let license_expiry = parse_date(&form.license_expiry, "license_expiry")?;
        let hired_on = parse_date(&form.hired_on, "hired_on")?;

        Ok(NewDriver::try_new(
            &form.full_name,
            &form.email,
            Some(form.phone.as_str()),
            &form.license_number,
            license_expiry,
            hired_on,
        )?)
    }
}
