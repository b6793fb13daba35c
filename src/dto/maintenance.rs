use serde::Serialize;

use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::types::{MaintenanceStatus, ServiceType};
use crate::dto::leases::PickerOption;
use crate::dto::list::{ChoiceOption, ListView};

#[derive(Debug, Serialize)]
pub struct MaintenanceRow {
    pub record: MaintenanceRecord,
    pub vehicle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MaintenancePageData {
    pub list: ListView<MaintenanceRow>,
    pub vehicles: Vec<PickerOption>,
    pub maintenance_statuses: Vec<ChoiceOption>,
}

impl MaintenancePageData {
    pub fn empty() -> Self {
        Self {
            list: ListView::empty::<MaintenanceStatus, ServiceType>(),
            vehicles: Vec::new(),
            maintenance_statuses: ChoiceOption::all::<MaintenanceStatus>(),
        }
    }
}
