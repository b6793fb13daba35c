use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::maintenance::{MaintenanceRecord, NewMaintenanceRecord};
use crate::domain::types::{Choice, MaintenanceId, MaintenanceStatus, ServiceType};
use crate::models::maintenance::{
    MaintenanceRecord as DbMaintenanceRecord, NewMaintenanceRecord as DbNewMaintenanceRecord,
};
use crate::query::criteria::FilterCriteria;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{like_pattern, limit_offset};
use crate::repository::{
    DieselRepository, MaintenanceListQuery, MaintenanceReader, MaintenanceWriter,
};
use crate::schema::maintenance_records;

fn filtered(
    criteria: &FilterCriteria<MaintenanceStatus, ServiceType>,
) -> maintenance_records::BoxedQuery<'static, Sqlite> {
    let mut items = maintenance_records::table.into_boxed::<Sqlite>();

    if let Some(status) = criteria.status {
        items = items.filter(maintenance_records::status.eq(status.as_str()));
    }
    if let Some(service_type) = criteria.category {
        items = items.filter(maintenance_records::service_type.eq(service_type.as_str()));
    }
    if let Some(term) = &criteria.search {
        let pattern = like_pattern(term);
        items = items.filter(
            maintenance_records::vendor
                .like(pattern.clone())
                .escape('\\')
                .or(maintenance_records::description
                    .like(pattern)
                    .escape('\\')),
        );
    }
    if let Some(from) = criteria.date_range.from {
        items = items.filter(maintenance_records::scheduled_on.ge(from));
    }
    if let Some(to) = criteria.date_range.to {
        items = items.filter(maintenance_records::scheduled_on.le(to));
    }
    items
}

impl MaintenanceReader for DieselRepository {
    fn get_maintenance_by_id(
        &self,
        id: MaintenanceId,
    ) -> RepositoryResult<Option<MaintenanceRecord>> {
        let mut conn = self.conn()?;

        let record = maintenance_records::table
            .find(id.get())
            .first::<DbMaintenanceRecord>(&mut conn)
            .optional()?;

        Ok(record.map(MaintenanceRecord::try_from).transpose()?)
    }

    fn list_maintenance(
        &self,
        query: MaintenanceListQuery,
    ) -> RepositoryResult<(usize, Vec<MaintenanceRecord>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query.criteria)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query.criteria).order((
            maintenance_records::scheduled_on.desc(),
            maintenance_records::id.desc(),
        ));
        if let Some(page) = &query.pagination {
            let (limit, offset) = limit_offset(page);
            items = items.limit(limit).offset(offset);
        }

        let items = items
            .load::<DbMaintenanceRecord>(&mut conn)?
            .into_iter()
            .map(MaintenanceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }
}

impl MaintenanceWriter for DieselRepository {
    fn create_maintenance(
        &self,
        new_record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut conn = self.conn()?;

        let insertable: DbNewMaintenanceRecord = new_record.into();
        let record = diesel::insert_into(maintenance_records::table)
            .values(&insertable)
            .get_result::<DbMaintenanceRecord>(&mut conn)?;

        Ok(MaintenanceRecord::try_from(record)?)
    }

    fn set_maintenance_status(
        &self,
        id: MaintenanceId,
        status: MaintenanceStatus,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut conn = self.conn()?;

        let record = diesel::update(maintenance_records::table.find(id.get()))
            .set(maintenance_records::status.eq(status.as_str()))
            .get_result::<DbMaintenanceRecord>(&mut conn)?;

        Ok(MaintenanceRecord::try_from(record)?)
    }

    fn delete_maintenance(&self, id: MaintenanceId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(maintenance_records::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
