use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::types::{Choice, VehicleId, VehicleStatus};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::models::vehicle::{NewVehicle as DbNewVehicle, Vehicle as DbVehicle};
use crate::query::stats::StatusCounts;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{like_pattern, limit_offset, timestamp_bounds};
use crate::repository::{
    DieselRepository, VehicleCriteria, VehicleListQuery, VehicleReader, VehicleWriter,
};
use crate::schema::vehicles;

type BoxedVehicleQuery<'a> = vehicles::BoxedQuery<'a, Sqlite>;

fn filtered(criteria: &VehicleCriteria) -> BoxedVehicleQuery<'static> {
    let mut items = vehicles::table.into_boxed::<Sqlite>();

    if let Some(status) = criteria.status {
        items = items.filter(vehicles::status.eq(status.as_str()));
    }
    if let Some(category) = criteria.category {
        items = items.filter(vehicles::category.eq(category.as_str()));
    }
    if let Some(term) = &criteria.search {
        let pattern = like_pattern(term);
        items = items.filter(
            vehicles::plate_number
                .like(pattern.clone())
                .escape('\\')
                .or(vehicles::make.like(pattern.clone()).escape('\\'))
                .or(vehicles::model.like(pattern.clone()).escape('\\'))
                .or(vehicles::vin.like(pattern).escape('\\')),
        );
    }
    let (start, end) = timestamp_bounds(&criteria.date_range);
    if let Some(start) = start {
        items = items.filter(vehicles::created_at.ge(start));
    }
    if let Some(end) = end {
        items = items.filter(vehicles::created_at.lt(end));
    }
    items
}

impl VehicleReader for DieselRepository {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let mut conn = self.conn()?;

        let vehicle = vehicles::table
            .find(id.get())
            .first::<DbVehicle>(&mut conn)
            .optional()?;

        Ok(vehicle.map(Vehicle::try_from).transpose()?)
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query.criteria)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query.criteria)
            .order((vehicles::created_at.desc(), vehicles::id.desc()));
        if let Some(page) = &query.pagination {
            let (limit, offset) = limit_offset(page);
            items = items.limit(limit).offset(offset);
        }

        let items = items
            .load::<DbVehicle>(&mut conn)?
            .into_iter()
            .map(Vehicle::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }

    fn vehicle_stats(
        &self,
        criteria: &VehicleCriteria,
    ) -> RepositoryResult<StatusCounts<VehicleStatus>> {
        let mut conn = self.conn()?;

        let statuses = filtered(criteria)
            .select(vehicles::status)
            .load::<String>(&mut conn)?
            .into_iter()
            .map(|s| s.parse::<VehicleStatus>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatusCounts::from_statuses(statuses))
    }
}

impl VehicleWriter for DieselRepository {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        let mut conn = self.conn()?;

        let insertable: DbNewVehicle = new_vehicle.into();
        let vehicle = diesel::insert_into(vehicles::table)
            .values(&insertable)
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(Vehicle::try_from(vehicle)?)
    }

    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle> {
        let mut conn = self.conn()?;

        let vehicle = diesel::update(vehicles::table.find(id.get()))
            .set((
                vehicles::status.eq(updates.status.as_str()),
                vehicles::mileage_km.eq(updates.mileage_km),
                vehicles::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(Vehicle::try_from(vehicle)?)
    }

    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(vehicles::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
