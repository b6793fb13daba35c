//! List query model shared by every fleet screen.
//!
//! A [`ListQuery`] couples typed [`FilterCriteria`] with an optional
//! [`PageRequest`]. Repositories that can filter on their own translate it
//! into their query language; the others run it through [`engine`].

pub mod criteria;
pub mod engine;
pub mod pagination;
pub mod sequence;
pub mod state;
pub mod stats;

use crate::domain::types::Choice;
use crate::query::criteria::{DateRange, FilterCriteria};
use crate::query::pagination::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S, C> {
    pub criteria: FilterCriteria<S, C>,
    pub pagination: Option<PageRequest>,
}

impl<S: Choice, C: Choice> Default for ListQuery<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Choice, C: Choice> ListQuery<S, C> {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            pagination: None,
        }
    }

    pub fn status(mut self, status: S) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn category(mut self, category: C) -> Self {
        self.criteria.category = Some(category);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.criteria.search = criteria::normalize_search(Some(search.into()));
        self
    }

    pub fn date_range(mut self, date_range: DateRange) -> Self {
        self.criteria.date_range = date_range;
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }

    /// Same criteria without the page window, used by exports and stats.
    pub fn unpaginated(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
            pagination: None,
        }
    }
}
