use serde::Serialize;

use crate::domain::audit_log::AuditLog;
use crate::domain::types::{AuditCategory, AuditLevel};
use crate::dto::list::ListView;
use crate::query::stats::StatusCounts;

/// Data required to render `audit_logs/index.html`.
#[derive(Debug, Serialize)]
pub struct AuditLogsPageData {
    pub list: ListView<AuditLog>,
    /// Per-level counts over the whole filtered set, not just this page.
    pub stats: StatusCounts<AuditLevel>,
    pub export_query: String,
}

impl AuditLogsPageData {
    pub fn empty() -> Self {
        Self {
            list: ListView::empty::<AuditLevel, AuditCategory>(),
            stats: StatusCounts::default(),
            export_query: String::new(),
        }
    }
}
