//! Shared pieces of every list screen.

use serde::Serialize;

use crate::domain::types::Choice;
use crate::query::pagination::{ALLOWED_PAGE_SIZES, Paginated};
use crate::query::state::{ListParams, ListState};

/// One entry of a status/category `<select>`.
#[derive(Debug, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub badge: &'static str,
}

impl ChoiceOption {
    pub fn all<T: Choice>() -> Vec<Self> {
        T::all()
            .iter()
            .map(|choice| ChoiceOption {
                value: choice.as_str(),
                label: choice.label(),
                badge: choice.badge(),
            })
            .collect()
    }
}

/// Pagination link; `href` is `None` for an ellipsis.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub number: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

/// A page of rows plus the state needed to redraw filters and page links.
#[derive(Debug, Serialize)]
pub struct ListView<T> {
    pub records: Paginated<T>,
    /// Current filter values echoed back into the form.
    pub filters: ListParams,
    pub links: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub statuses: Vec<ChoiceOption>,
    pub categories: Vec<ChoiceOption>,
    pub page_sizes: &'static [usize],
}

impl<T> ListView<T> {
    pub fn new<S: Choice, C: Choice>(state: &ListState<S, C>, total: usize, items: Vec<T>) -> Self {
        let records = Paginated::new(items, state.page(), total);
        let href = |page: usize| format!("?{}", state.query_string(page));

        let links = records
            .pages
            .iter()
            .map(|page| PageLink {
                number: *page,
                href: page.map(href),
                current: *page == Some(records.page),
            })
            .collect();
        let prev_href = records.has_prev.then(|| href(records.page.saturating_sub(1)));
        let next_href = records.has_next.then(|| href(records.page.saturating_add(1)));

        let mut filters = state.to_params(records.page);
        filters.page = None;

        Self {
            links,
            prev_href,
            next_href,
            filters,
            statuses: ChoiceOption::all::<S>(),
            categories: ChoiceOption::all::<C>(),
            page_sizes: &ALLOWED_PAGE_SIZES,
            records,
        }
    }

    /// No rows and default filters, shown when the list failed to load.
    pub fn empty<S: Choice, C: Choice>() -> Self {
        Self::new(&ListState::<S, C>::new(), 0, Vec::new())
    }
}
