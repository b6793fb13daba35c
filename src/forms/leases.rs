use serde::Deserialize;
use validator::Validate;

use crate::domain::lease::NewLease;
use crate::domain::types::ContractKind;
use crate::forms::{FormError, parse_choice, parse_date, parse_optional_id, to_cents};

#[derive(Debug, Deserialize, Validate)]
/// Form data for drafting a lease or rental contract.
pub struct AddLeaseForm {
    #[validate(length(min = 1, max = 32))]
    pub contract_number: String,
    pub vehicle_id: i32,
    #[serde(default)]
    pub driver_id: String,
    #[validate(length(min = 1, max = 128))]
    pub customer_name: String,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    /// Monthly rate in currency units.
    #[validate(range(min = 0.0))]
    pub monthly_rate: f64,
}

impl TryFrom<AddLeaseForm> for NewLease {
    type Error = FormError;

    fn try_from(form: AddLeaseForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let kind: ContractKind = parse_choice(&form.kind, "kind")?;
        let driver_id = parse_optional_id(&form.driver_id, "driver_id")?;

        Ok(NewLease::try_new(
            &form.contract_number,
            form.vehicle_id,
            driver_id,
            &form.customer_name,
            kind,
            parse_date(&form.start_date, "start_date")?,
            parse_date(&form.end_date, "end_date")?,
            to_cents(form.monthly_rate),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    fn form() -> AddLeaseForm {
        AddLeaseForm {
            contract_number: "CT-9".into(),
            vehicle_id: 3,
            driver_id: "".into(),
            customer_name: "Acme".into(),
            kind: "lease".into(),
            start_date: "2025-01-01".into(),
            end_date: "2025-12-31".into(),
            monthly_rate: 499.5,
        }
    }

    #[test]
    fn converts_rate_to_cents() {
        let lease = NewLease::try_from(form()).unwrap();
        assert_eq!(lease.monthly_rate, 49_950);
        assert!(lease.driver_id.is_none());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut form = form();
        form.end_date = "2024-12-31".into();
        assert!(matches!(
            NewLease::try_from(form),
            Err(FormError::TypeConstraint(
                TypeConstraintError::InvalidDateRange
            ))
        ));
    }
}
