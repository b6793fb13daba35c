use serde::Serialize;

use crate::domain::driver::Driver;
use crate::domain::types::{DriverStatus, Uncategorized};
use crate::dto::list::ListView;

/// Driver row with the derived license flag.
#[derive(Debug, Serialize)]
pub struct DriverRow {
    pub driver: Driver,
    pub license_expired: bool,
}

#[derive(Debug, Serialize)]
pub struct DriversPageData {
    pub list: ListView<DriverRow>,
    /// Query string of the current filters, used by the export link.
    pub export_query: String,
}

impl DriversPageData {
    pub fn empty() -> Self {
        Self {
            list: ListView::empty::<DriverStatus, Uncategorized>(),
            export_query: String::new(),
        }
    }
}
