use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::lease::{Lease, NewLease};
use crate::domain::types::{Choice, ContractKind, LeaseId, LeaseStatus};
use crate::models::lease::{Lease as DbLease, NewLease as DbNewLease};
use crate::query::criteria::FilterCriteria;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{like_pattern, limit_offset};
use crate::repository::{DieselRepository, LeaseListQuery, LeaseReader, LeaseWriter};
use crate::schema::leases;

fn filtered(
    criteria: &FilterCriteria<LeaseStatus, ContractKind>,
) -> leases::BoxedQuery<'static, Sqlite> {
    let mut items = leases::table.into_boxed::<Sqlite>();

    if let Some(status) = criteria.status {
        items = items.filter(leases::status.eq(status.as_str()));
    }
    if let Some(kind) = criteria.category {
        items = items.filter(leases::kind.eq(kind.as_str()));
    }
    if let Some(term) = &criteria.search {
        let pattern = like_pattern(term);
        items = items.filter(
            leases::contract_number
                .like(pattern.clone())
                .escape('\\')
                .or(leases::customer_name.like(pattern).escape('\\')),
        );
    }
    if let Some(from) = criteria.date_range.from {
        items = items.filter(leases::start_date.ge(from));
    }
    if let Some(to) = criteria.date_range.to {
        items = items.filter(leases::start_date.le(to));
    }
    items
}

impl LeaseReader for DieselRepository {
    fn get_lease_by_id(&self, id: LeaseId) -> RepositoryResult<Option<Lease>> {
        let mut conn = self.conn()?;

        let lease = leases::table
            .find(id.get())
            .first::<DbLease>(&mut conn)
            .optional()?;

        Ok(lease.map(Lease::try_from).transpose()?)
    }

    fn list_leases(&self, query: LeaseListQuery) -> RepositoryResult<(usize, Vec<Lease>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query.criteria)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered(&query.criteria).order((leases::start_date.desc(), leases::id.desc()));
        if let Some(page) = &query.pagination {
            let (limit, offset) = limit_offset(page);
            items = items.limit(limit).offset(offset);
        }

        let items = items
            .load::<DbLease>(&mut conn)?
            .into_iter()
            .map(Lease::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }
}

impl LeaseWriter for DieselRepository {
    fn create_lease(&self, new_lease: &NewLease) -> RepositoryResult<Lease> {
        let mut conn = self.conn()?;

        let insertable: DbNewLease = new_lease.into();
        let lease = diesel::insert_into(leases::table)
            .values(&insertable)
            .get_result::<DbLease>(&mut conn)?;

        Ok(Lease::try_from(lease)?)
    }

    fn set_lease_status(&self, id: LeaseId, status: LeaseStatus) -> RepositoryResult<Lease> {
        let mut conn = self.conn()?;

        let lease = diesel::update(leases::table.find(id.get()))
            .set(leases::status.eq(status.as_str()))
            .get_result::<DbLease>(&mut conn)?;

        Ok(Lease::try_from(lease)?)
    }

    fn delete_lease(&self, id: LeaseId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(leases::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
