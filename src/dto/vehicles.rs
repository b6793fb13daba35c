use serde::Serialize;

use crate::domain::types::{VehicleCategory, VehicleStatus};
use crate::domain::vehicle::Vehicle;
use crate::dto::list::ListView;
use crate::query::stats::StatusCounts;

/// Data required to render `vehicles/index.html`.
#[derive(Debug, Serialize)]
pub struct VehiclesPageData {
    pub list: ListView<Vehicle>,
    pub stats: StatusCounts<VehicleStatus>,
}

impl VehiclesPageData {
    pub fn empty() -> Self {
        Self {
            list: ListView::empty::<VehicleStatus, VehicleCategory>(),
            stats: StatusCounts::default(),
        }
    }
}
