use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::driver::{Driver, NewDriver};
use crate::domain::types::{Choice, DriverId, DriverStatus, Uncategorized};
use crate::models::driver::{Driver as DbDriver, NewDriver as DbNewDriver};
use crate::query::criteria::FilterCriteria;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{like_pattern, limit_offset};
use crate::repository::{DieselRepository, DriverListQuery, DriverReader, DriverWriter};
use crate::schema::drivers;

fn filtered(
    criteria: &FilterCriteria<DriverStatus, Uncategorized>,
) -> drivers::BoxedQuery<'static, Sqlite> {
    let mut items = drivers::table.into_boxed::<Sqlite>();

    if let Some(status) = criteria.status {
        items = items.filter(drivers::status.eq(status.as_str()));
    }
    if let Some(term) = &criteria.search {
        let pattern = like_pattern(term);
        items = items.filter(
            drivers::full_name
                .like(pattern.clone())
                .escape('\\')
                .or(drivers::email.like(pattern.clone()).escape('\\'))
                .or(drivers::license_number.like(pattern.clone()).escape('\\'))
                .or(drivers::phone
                    .assume_not_null()
                    .like(pattern)
                    .escape('\\')),
        );
    }
    if let Some(from) = criteria.date_range.from {
        items = items.filter(drivers::hired_on.ge(from));
    }
    if let Some(to) = criteria.date_range.to {
        items = items.filter(drivers::hired_on.le(to));
    }
    items
}

impl DriverReader for DieselRepository {
    fn get_driver_by_id(&self, id: DriverId) -> RepositoryResult<Option<Driver>> {
        let mut conn = self.conn()?;

        let driver = drivers::table
            .find(id.get())
            .first::<DbDriver>(&mut conn)
            .optional()?;

        Ok(driver.map(Driver::try_from).transpose()?)
    }

    fn list_drivers(&self, query: DriverListQuery) -> RepositoryResult<(usize, Vec<Driver>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query.criteria)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered(&query.criteria).order((drivers::hired_on.desc(), drivers::id.desc()));
        if let Some(page) = &query.pagination {
            let (limit, offset) = limit_offset(page);
            items = items.limit(limit).offset(offset);
        }

        let items = items
            .load::<DbDriver>(&mut conn)?
            .into_iter()
            .map(Driver::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }
}

impl DriverWriter for DieselRepository {
    fn create_driver(&self, new_driver: &NewDriver) -> RepositoryResult<Driver> {
        let mut conn = self.conn()?;

        let insertable: DbNewDriver = new_driver.into();
        let driver = diesel::insert_into(drivers::table)
            .values(&insertable)
            .get_result::<DbDriver>(&mut conn)?;

        Ok(Driver::try_from(driver)?)
    }

    fn set_driver_status(&self, id: DriverId, status: DriverStatus) -> RepositoryResult<Driver> {
        let mut conn = self.conn()?;

        let driver = diesel::update(drivers::table.find(id.get()))
            .set((
                drivers::status.eq(status.as_str()),
                drivers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbDriver>(&mut conn)?;

        Ok(Driver::try_from(driver)?)
    }

    fn delete_driver(&self, id: DriverId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(drivers::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
