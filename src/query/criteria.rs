use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Choice, TypeConstraintError};

/// Inclusive date window; either end may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, TypeConstraintError> {
        if let (Some(from), Some(to)) = (from, to)
            && to < from
        {
            return Err(TypeConstraintError::InvalidDateRange);
        }
        Ok(Self { from, to })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// User-selected constraints narrowing a list view.
///
/// Each field is independent; `None` means the constraint is not applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterCriteria<S, C> {
    pub status: Option<S>,
    pub category: Option<C>,
    pub search: Option<String>,
    pub date_range: DateRange,
}

impl<S, C> Default for FilterCriteria<S, C> {
    fn default() -> Self {
        Self {
            status: None,
            category: None,
            search: None,
            date_range: DateRange::default(),
        }
    }
}

impl<S: Choice, C: Choice> FilterCriteria<S, C> {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.search.is_none()
            && self.date_range.is_unbounded()
    }
}

/// Trims the search term; a blank term means "no filter".
pub fn normalize_search(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
