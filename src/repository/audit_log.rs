use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::audit_log::{AuditLog, NewAuditLog};
use crate::domain::types::{AuditLevel, Choice};
use crate::models::audit_log::{AuditLog as DbAuditLog, NewAuditLog as DbNewAuditLog};
use crate::query::stats::StatusCounts;
use crate::repository::errors::RepositoryResult;
use crate::repository::sql::{like_pattern, limit_offset, timestamp_bounds};
use crate::repository::{
    AuditLogCriteria, AuditLogListQuery, AuditLogReader, AuditLogWriter, DieselRepository,
};
use crate::schema::audit_logs;

fn filtered(criteria: &AuditLogCriteria) -> audit_logs::BoxedQuery<'static, Sqlite> {
    let mut items = audit_logs::table.into_boxed::<Sqlite>();

    if let Some(level) = criteria.status {
        items = items.filter(audit_logs::level.eq(level.as_str()));
    }
    if let Some(category) = criteria.category {
        items = items.filter(audit_logs::category.eq(category.as_str()));
    }
    if let Some(term) = &criteria.search {
        let pattern = like_pattern(term);
        items = items.filter(
            audit_logs::actor
                .like(pattern.clone())
                .escape('\\')
                .or(audit_logs::action.like(pattern.clone()).escape('\\'))
                .or(audit_logs::resource.like(pattern.clone()).escape('\\'))
                .or(audit_logs::details.like(pattern).escape('\\')),
        );
    }
    let (start, end) = timestamp_bounds(&criteria.date_range);
    if let Some(start) = start {
        items = items.filter(audit_logs::occurred_at.ge(start));
    }
    if let Some(end) = end {
        items = items.filter(audit_logs::occurred_at.lt(end));
    }
    items
}

impl AuditLogReader for DieselRepository {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query.criteria)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query.criteria)
            .order((audit_logs::occurred_at.desc(), audit_logs::id.desc()));
        if let Some(page) = &query.pagination {
            let (limit, offset) = limit_offset(page);
            items = items.limit(limit).offset(offset);
        }

        let items = items
            .load::<DbAuditLog>(&mut conn)?
            .into_iter()
            .map(AuditLog::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }

    fn audit_log_stats(
        &self,
        criteria: &AuditLogCriteria,
    ) -> RepositoryResult<StatusCounts<AuditLevel>> {
        let mut conn = self.conn()?;

        let levels = filtered(criteria)
            .select(audit_logs::level)
            .load::<String>(&mut conn)?
            .into_iter()
            .map(|level| level.parse::<AuditLevel>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatusCounts::from_statuses(levels))
    }
}

impl AuditLogWriter for DieselRepository {
    fn record_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        let mut conn = self.conn()?;

        let insertable: DbNewAuditLog = entry.into();
        let log = diesel::insert_into(audit_logs::table)
            .values(&insertable)
            .get_result::<DbAuditLog>(&mut conn)?;

        Ok(AuditLog::try_from(log)?)
    }
}
