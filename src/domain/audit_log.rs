use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AuditCategory, AuditLevel, AuditLogId};
use crate::query::engine::Filterable;

/// Entry of the system audit trail.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub occurred_at: NaiveDateTime,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub level: AuditLevel,
    pub category: AuditCategory,
    pub ip_address: Option<String>,
    pub details: String,
}

impl Filterable for AuditLog {
    type Status = AuditLevel;
    type Category = AuditCategory;

    fn status(&self) -> AuditLevel {
        self.level
    }

    fn category(&self) -> Option<AuditCategory> {
        Some(self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.actor.as_str(),
            self.action.as_str(),
            self.resource.as_str(),
            self.details.as_str(),
        ]
    }

    fn filter_date(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    fn sort_key(&self) -> (NaiveDateTime, i32) {
        (self.occurred_at, self.id.get())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAuditLog {
    pub occurred_at: NaiveDateTime,
    pub actor: String,
    pub action: String,
    pub resource: String,
    pub level: AuditLevel,
    pub category: AuditCategory,
    pub ip_address: Option<String>,
    pub details: String,
}

impl NewAuditLog {
    /// Informational entry stamped with the current time.
    pub fn info(
        category: AuditCategory,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            occurred_at: Utc::now().naive_utc(),
            actor: "dashboard".to_string(),
            action: action.into(),
            resource: resource.into(),
            level: AuditLevel::Info,
            category,
            ip_address: None,
            details: String::new(),
        }
    }

    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}
