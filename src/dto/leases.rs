use serde::Serialize;

use crate::domain::lease::Lease;
use crate::domain::types::{ContractKind, LeaseStatus};
use crate::dto::list::{ChoiceOption, ListView};

/// Option of a vehicle or driver picker.
#[derive(Debug, Serialize)]
pub struct PickerOption {
    pub id: i32,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct LeaseRow {
    pub lease: Lease,
    /// Display name of the leased vehicle, if it is still known.
    pub vehicle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeasesPageData {
    pub list: ListView<LeaseRow>,
    pub vehicles: Vec<PickerOption>,
    pub drivers: Vec<PickerOption>,
    /// Every lease status, for the row status switch.
    pub lease_statuses: Vec<ChoiceOption>,
}

impl LeasesPageData {
    pub fn empty() -> Self {
        Self {
            list: ListView::empty::<LeaseStatus, ContractKind>(),
            vehicles: Vec::new(),
            drivers: Vec::new(),
            lease_statuses: ChoiceOption::all::<LeaseStatus>(),
        }
    }
}
