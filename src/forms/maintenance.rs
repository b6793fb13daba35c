use serde::Deserialize;
use validator::Validate;

use crate::domain::maintenance::NewMaintenanceRecord;
use crate::domain::types::ServiceType;
use crate::forms::{FormError, parse_choice, parse_date, to_cents};

#[derive(Debug, Deserialize, Validate)]
/// Form data for scheduling a service visit.
pub struct ScheduleMaintenanceForm {
    pub vehicle_id: i32,
    pub service_type: String,
    pub scheduled_on: String,
    #[validate(length(min = 1, max = 128))]
    pub vendor: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Estimated cost in currency units.
    #[validate(range(min = 0.0))]
    pub cost: f64,
}

impl TryFrom<ScheduleMaintenanceForm> for NewMaintenanceRecord {
    type Error = FormError;

    fn try_from(form: ScheduleMaintenanceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let service_type: ServiceType = parse_choice(&form.service_type, "service_type")?;

        Ok(NewMaintenanceRecord::try_new(
            form.vehicle_id,
            service_type,
            parse_date(&form.scheduled_on, "scheduled_on")?,
            &form.vendor,
            &form.description,
            to_cents(form.cost),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MaintenanceStatus;

    #[test]
    fn scheduled_record_sanitizes_description() {
        let form = ScheduleMaintenanceForm {
            vehicle_id: 2,
            service_type: "brakes".into(),
            scheduled_on: "2025-07-01".into(),
            vendor: " Central Garage ".into(),
            description: "Front pads <script>alert(1)</script>".into(),
            cost: 120.0,
        };
        let record = NewMaintenanceRecord::try_from(form).unwrap();
        assert_eq!(record.status, MaintenanceStatus::Scheduled);
        assert_eq!(record.vendor, "Central Garage");
        assert_eq!(record.cost, 12_000);
        assert!(!record.description.as_str().contains("<script>"));
    }
}
