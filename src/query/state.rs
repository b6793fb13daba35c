//! Filter and page state of a list screen.
//!
//! [`ListParams`] is the untyped query-string shape submitted by the filter
//! forms. [`ListState`] is its validated, typed counterpart: every enumerated
//! value is checked against its closed set, and every filter change moves the
//! cursor back to the first page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Choice, TypeConstraintError};
use crate::query::ListQuery;
use crate::query::criteria::{DateRange, FilterCriteria, normalize_search};
use crate::query::pagination::{DEFAULT_ITEMS_PER_PAGE, PageRequest};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw list parameters as they appear in the query string.
///
/// Everything is optional text; empty values mean "not set".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_choice<T: Choice>(value: &Option<String>) -> Result<Option<T>, TypeConstraintError> {
    non_blank(value).map(str::parse).transpose()
}

fn parse_date(value: &Option<String>) -> Result<Option<NaiveDate>, TypeConstraintError> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| TypeConstraintError::InvalidValue(format!("invalid date `{raw}`")))
        })
        .transpose()
}

fn parse_number(value: &Option<String>, name: &str) -> Result<Option<usize>, TypeConstraintError> {
    non_blank(value)
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("invalid {name} `{raw}`")))
        })
        .transpose()
}

/// Typed filter criteria plus the page cursor of one list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListState<S, C> {
    criteria: FilterCriteria<S, C>,
    page: PageRequest,
}

impl<S: Choice, C: Choice> Default for ListState<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Choice, C: Choice> ListState<S, C> {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: PageRequest::default(),
        }
    }

    /// Validates raw parameters. Unknown statuses or categories, malformed
    /// dates and unsupported page sizes are rejected.
    pub fn from_params(params: &ListParams) -> Result<Self, TypeConstraintError> {
        let date_range = DateRange::new(parse_date(&params.from)?, parse_date(&params.to)?)?;
        let per_page = parse_number(&params.per_page, "page size")?.unwrap_or(DEFAULT_ITEMS_PER_PAGE);
        let page = parse_number(&params.page, "page")?.unwrap_or(1);

        Ok(Self {
            criteria: FilterCriteria {
                status: parse_choice(&params.status)?,
                category: parse_choice(&params.category)?,
                search: normalize_search(params.q.clone()),
                date_range,
            },
            page: PageRequest::new(page, per_page)?,
        })
    }

    pub fn criteria(&self) -> &FilterCriteria<S, C> {
        &self.criteria
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    fn reset_page(&mut self) {
        self.page.page = 1;
    }

    pub fn set_status(&mut self, status: Option<S>) {
        self.criteria.status = status;
        self.reset_page();
    }

    pub fn set_category(&mut self, category: Option<C>) {
        self.criteria.category = category;
        self.reset_page();
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.criteria.search = normalize_search(search);
        self.reset_page();
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.criteria.date_range = date_range;
        self.reset_page();
    }

    pub fn set_per_page(&mut self, per_page: usize) -> Result<(), TypeConstraintError> {
        self.page = PageRequest::first(per_page)?;
        Ok(())
    }

    /// Moves the cursor without touching the criteria.
    pub fn set_page(&mut self, page: usize) {
        self.page.page = page.max(1);
    }

    /// Back to the defaults of a freshly opened screen.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn to_query(&self) -> ListQuery<S, C> {
        ListQuery {
            criteria: self.criteria.clone(),
            pagination: Some(self.page),
        }
    }

    /// Raw parameters describing this state at the given page.
    pub fn to_params(&self, page: usize) -> ListParams {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string());
        ListParams {
            status: self.criteria.status.map(|s| s.as_str().to_string()),
            category: self.criteria.category.map(|c| c.as_str().to_string()),
            q: self.criteria.search.clone(),
            from: date(self.criteria.date_range.from),
            to: date(self.criteria.date_range.to),
            page: Some(page.max(1).to_string()),
            per_page: (self.page.per_page != DEFAULT_ITEMS_PER_PAGE)
                .then(|| self.page.per_page.to_string()),
        }
    }

    /// Query string linking to `page` with the current filters kept.
    #[cfg(feature = "server")]
    pub fn query_string(&self, page: usize) -> String {
        serde_html_form::to_string(self.to_params(page)).unwrap_or_default()
    }
}
