//! Diesel models for the audit trail.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    audit_log::{AuditLog as DomainAuditLog, NewAuditLog as DomainNewAuditLog},
    types::{AuditLogId, Choice, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::audit_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditLog {
    pub id: i32,
    pub occurred_at: NaiveDateTime,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub level: String,
    pub category: String,
    pub ip_address: Option<String>,
    pub details: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_logs)]
pub struct NewAuditLog<'a> {
    pub occurred_at: NaiveDateTime,
    pub actor: &'a str,
    pub action: &'a str,
    pub resource: &'a str,
    pub level: &'a str,
    pub category: &'a str,
    pub ip_address: Option<&'a str>,
    pub details: &'a str,
}

impl TryFrom<AuditLog> for DomainAuditLog {
    type Error = TypeConstraintError;

    fn try_from(log: AuditLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AuditLogId::new(log.id)?,
            occurred_at: log.occurred_at,
            actor: log.actor,
            action: log.action,
            resource: log.resource,
            level: log.level.parse()?,
            category: log.category.parse()?,
            ip_address: log.ip_address,
            details: log.details,
        })
    }
}

impl<'a> From<&'a DomainNewAuditLog> for NewAuditLog<'a> {
    fn from(log: &'a DomainNewAuditLog) -> Self {
        Self {
            occurred_at: log.occurred_at,
            actor: log.actor.as_str(),
            action: log.action.as_str(),
            resource: log.resource.as_str(),
            level: log.level.as_str(),
            category: log.category.as_str(),
            ip_address: log.ip_address.as_deref(),
            details: log.details.as_str(),
        }
    }
}
