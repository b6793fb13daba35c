//! Form definitions backing the fleet screens.

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{Choice, TypeConstraintError};

pub mod drivers;
pub mod leases;
pub mod maintenance;
pub mod vehicles;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid date in `{0}`, expected YYYY-MM-DD")]
    InvalidDate(&'static str),

    #[error("invalid `{0}`")]
    InvalidChoice(&'static str),

    #[error("invalid identifier in `{0}`")]
    InvalidId(&'static str),

    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

pub(crate) fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate(field))
}

pub(crate) fn parse_choice<T: Choice>(raw: &str, field: &'static str) -> Result<T, FormError> {
    raw.parse().map_err(|_| FormError::InvalidChoice(field))
}

/// Blank select values mean "none".
pub(crate) fn parse_optional_id(raw: &str, field: &'static str) -> Result<Option<i32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidId(field))
}

/// Converts an amount in currency units to cents.
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Form used by every "change status" button.
#[derive(Debug, serde::Deserialize)]
pub struct StatusForm {
    pub status: String,
}

impl StatusForm {
    pub fn parse<T: Choice>(&self) -> Result<T, FormError> {
        parse_choice(&self.status, "status")
    }
}
