use chrono::Utc;

use crate::domain::types::{AuditCategory, AuditLevel};
use crate::dto::audit_logs::AuditLogsPageData;
use crate::dto::list::ListView;
use crate::query::state::{ListParams, ListState};
use crate::repository::AuditLogReader;
use crate::services::ServiceResult;
use crate::services::export::{self, ExportFile, ExportFormat};
use crate::services::list_state;

type AuditLogListState = ListState<AuditLevel, AuditCategory>;

/// Loads a page of audit entries and the per-level counts of the whole
/// filtered set.
pub fn load_audit_logs_page<R>(repo: &R, params: &ListParams) -> ServiceResult<AuditLogsPageData>
where
    R: AuditLogReader + ?Sized,
{
    let state: AuditLogListState = list_state(params)?;
    let (total, logs, stats) = repo.audit_log_page(state.to_query())?;

    Ok(AuditLogsPageData {
        list: ListView::new(&state, total, logs),
        stats,
        export_query: state.query_string(1),
    })
}

/// Exports every entry matching the current filters.
pub fn export_audit_logs<R>(
    repo: &R,
    params: &ListParams,
    format: ExportFormat,
) -> ServiceResult<ExportFile>
where
    R: AuditLogReader + ?Sized,
{
    let state: AuditLogListState = list_state(params)?;
    let (_, logs) = repo.list_audit_logs(state.to_query().unpaginated())?;
    export::audit_logs(&logs, format, Utc::now().date_naive())
}
