//! Business logic behind the fleet screens and the JSON API.
//!
//! Services are synchronous and generic over the repository traits they
//! need, so routes can run them on the blocking pool and tests can drive them
//! with the in-memory or mock repositories.

pub mod api;
pub mod audit_logs;
pub mod drivers;
pub mod errors;
pub mod export;
pub mod leases;
pub mod main;
pub mod maintenance;
pub mod retry;
pub mod vehicles;

pub use errors::{ServiceError, ServiceResult};

use crate::domain::audit_log::NewAuditLog;
use crate::domain::types::Choice;
use crate::query::state::{ListParams, ListState};
use crate::repository::AuditLogWriter;

/// Validates raw list parameters into a typed state.
pub(crate) fn list_state<S: Choice, C: Choice>(
    params: &ListParams,
) -> ServiceResult<ListState<S, C>> {
    Ok(ListState::from_params(params)?)
}

/// Records an audit entry for a completed action.
///
/// A failure is logged and swallowed: the action itself already succeeded.
pub(crate) fn record_audit<R>(repo: &R, entry: NewAuditLog)
where
    R: AuditLogWriter + ?Sized,
{
    if let Err(err) = repo.record_audit_log(&entry) {
        log::warn!(
            "Failed to record audit entry `{}` on {}: {err}",
            entry.action,
            entry.resource
        );
    }
}
