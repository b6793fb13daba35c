//! In-memory filter / paginate engine.
//!
//! Used when the data source cannot filter on its own (the mock fallback
//! collections). Results are ordered exactly like the SQL repository orders
//! them: newest first, ties broken by descending id.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::types::Choice;
use crate::query::ListQuery;
use crate::query::criteria::FilterCriteria;
use crate::query::pagination::PageRequest;

/// A record the list screens can filter.
pub trait Filterable {
    type Status: Choice;
    type Category: Choice;

    fn status(&self) -> Self::Status;
    /// `None` for records without a category dimension.
    fn category(&self) -> Option<Self::Category>;
    /// Text fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;
    /// Date compared against the date range filter.
    fn filter_date(&self) -> NaiveDate;
    fn sort_key(&self) -> (NaiveDateTime, i32);
}

/// Compiled form of [`FilterCriteria`] with the search needle lower-cased once.
struct Predicate<'c, S, C> {
    criteria: &'c FilterCriteria<S, C>,
    needle: Option<String>,
}

impl<'c, S: Choice, C: Choice> Predicate<'c, S, C> {
    fn new(criteria: &'c FilterCriteria<S, C>) -> Self {
        Self {
            criteria,
            needle: criteria.search.as_ref().map(|s| s.to_lowercase()),
        }
    }

    fn matches<T>(&self, item: &T) -> bool
    where
        T: Filterable<Status = S, Category = C>,
    {
        if let Some(status) = self.criteria.status
            && item.status() != status
        {
            return false;
        }
        if let Some(category) = self.criteria.category
            && item.category() != Some(category)
        {
            return false;
        }
        if let Some(needle) = &self.needle
            && !item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()))
        {
            return false;
        }
        self.criteria.date_range.contains(item.filter_date())
    }
}

/// Returns whether `item` satisfies every active constraint.
pub fn matches<T: Filterable>(item: &T, criteria: &FilterCriteria<T::Status, T::Category>) -> bool {
    Predicate::new(criteria).matches(item)
}

/// Applies the criteria and sorts the survivors newest first.
pub fn filter<'a, T: Filterable>(
    items: &'a [T],
    criteria: &FilterCriteria<T::Status, T::Category>,
) -> Vec<&'a T> {
    let predicate = Predicate::new(criteria);
    let mut filtered: Vec<&T> = items.iter().filter(|item| predicate.matches(*item)).collect();
    filtered.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    filtered
}

/// Copies out the requested page of an already filtered list.
pub fn paginate<T: Clone>(filtered: &[&T], page: PageRequest) -> Vec<T> {
    filtered[page.bounds(filtered.len())]
        .iter()
        .map(|item| (*item).clone())
        .collect()
}

/// Runs a full list query: filter, count, then slice.
///
/// Returns the total number of matches (not the page length) with the page.
pub fn run<T>(items: &[T], query: &ListQuery<T::Status, T::Category>) -> (usize, Vec<T>)
where
    T: Filterable + Clone,
{
    let filtered = filter(items, &query.criteria);
    let total = filtered.len();
    let page = match query.pagination {
        Some(page) => paginate(&filtered, page),
        None => filtered.into_iter().cloned().collect(),
    };
    (total, page)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{AuditLevel, Choice};
    use crate::query::criteria::DateRange;
    use crate::query::pagination::total_pages;
    use crate::query::stats::StatusCounts;

    #[derive(Clone, Debug, PartialEq)]
    struct Entry {
        id: i32,
        level: AuditLevel,
        text: String,
        other: String,
        day: u32,
    }

    impl Filterable for Entry {
        type Status = AuditLevel;
        type Category = crate::domain::types::Uncategorized;

        fn status(&self) -> AuditLevel {
            self.level
        }

        fn category(&self) -> Option<Self::Category> {
            None
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.text.as_str(), self.other.as_str()]
        }

        fn filter_date(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 1, self.day).unwrap()
        }

        fn sort_key(&self) -> (NaiveDateTime, i32) {
            (
                self.filter_date().and_time(chrono::NaiveTime::MIN),
                self.id,
            )
        }
    }

    fn entries(n: i32) -> Vec<Entry> {
        (1..=n)
            .map(|id| Entry {
                id,
                level: AuditLevel::all()[(id as usize) % 4],
                text: format!("Vehicle #{id} updated"),
                other: if id % 5 == 0 { "FLEET-ops".into() } else { "misc".into() },
                day: (id as u32 % 28) + 1,
            })
            .collect()
    }

    type Query = ListQuery<AuditLevel, crate::domain::types::Uncategorized>;

    #[test]
    fn status_filter_counts_all_matches_not_page() {
        let items = entries(200);
        let critical = items
            .iter()
            .filter(|e| e.level == AuditLevel::Critical)
            .count();

        let query = Query::new()
            .status(AuditLevel::Critical)
            .paginate(PageRequest::new(1, 10).unwrap());
        let (total, page) = run(&items, &query);

        assert_eq!(total, critical);
        assert_eq!(page.len(), critical.min(10));
        assert!(page.iter().all(|e| e.level == AuditLevel::Critical));
    }

    #[test]
    fn search_is_case_insensitive_and_matches_any_field() {
        let items = entries(20);
        let (by_text, _) = run(&items, &Query::new().search("VEHICLE #1"));
        // #1, #10..#19
        assert_eq!(by_text, 11);

        let (by_other, found) = run(&items, &Query::new().search("fleet-OPS"));
        assert_eq!(by_other, 4);
        assert!(found.iter().all(|e| e.id % 5 == 0));
    }

    #[test]
    fn filters_combine_with_and() {
        let items = entries(40);
        let query = Query::new().status(AuditLevel::Info).search("fleet");
        let (total, found) = run(&items, &query);
        assert!(
            found
                .iter()
                .all(|e| e.level == AuditLevel::Info && e.other == "FLEET-ops")
        );
        let expected = items
            .iter()
            .filter(|e| e.level == AuditLevel::Info && e.id % 5 == 0)
            .count();
        assert_eq!(total, expected);
    }

    #[test]
    fn blank_search_matches_everything() {
        let items = entries(12);
        let (total, _) = run(&items, &Query::new().search("   "));
        assert_eq!(total, 12);
    }

    #[test]
    fn date_range_membership_is_inclusive() {
        let items = entries(28);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 2),
            NaiveDate::from_ymd_opt(2025, 1, 4),
        )
        .unwrap();
        let (total, found) = run(&items, &Query::new().date_range(range));
        assert_eq!(total, 3);
        assert!(found.iter().all(|e| (2..=4).contains(&e.day)));
    }

    #[test]
    fn page_boundaries() {
        let items = entries(25);
        let last = Query::new().paginate(PageRequest::new(3, 10).unwrap());
        let (total, page) = run(&items, &last);
        assert_eq!(total_pages(total, 10), 3);
        assert_eq!(page.len(), 5);

        let beyond = Query::new().paginate(PageRequest::new(4, 10).unwrap());
        let (total, page) = run(&items, &beyond);
        assert_eq!(total, 25);
        assert!(page.is_empty());
    }

    #[test]
    fn page_invariants_hold_for_every_filter_combination() {
        let items = entries(137);
        let searches = [None, Some("vehicle"), Some("fleet"), Some("nothing-matches")];
        for per_page in [10, 20, 50, 100] {
            for status in std::iter::once(None).chain(AuditLevel::all().iter().copied().map(Some)) {
                for search in searches {
                    let mut query = Query::new();
                    if let Some(status) = status {
                        query = query.status(status);
                    }
                    if let Some(search) = search {
                        query = query.search(search);
                    }
                    let (total, _) = run(&items, &query);
                    let pages = total_pages(total, per_page);
                    assert_eq!(pages, total.div_ceil(per_page));
                    for page in 1..=pages + 1 {
                        let paged = query.clone().paginate(PageRequest::new(page, per_page).unwrap());
                        let (paged_total, slice) = run(&items, &paged);
                        assert_eq!(paged_total, total);
                        assert!(slice.len() <= per_page);
                        if page > pages {
                            assert!(slice.is_empty());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = entries(60);
        let query = Query::new().status(AuditLevel::Warning).search("updated");
        assert_eq!(run(&items, &query), run(&items, &query));

        let (_, once) = run(&items, &query);
        let (total_twice, twice) = run(&once, &query);
        assert_eq!(total_twice, once.len());
        assert_eq!(twice, once);
    }

    #[test]
    fn results_are_newest_first() {
        let items = entries(10);
        let (_, found) = run(&items, &Query::new());
        let keys: Vec<_> = found.iter().map(|e| e.sort_key()).collect();
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(keys, sorted);
    }

    #[test]
    fn stats_are_taken_before_pagination() {
        let items = entries(200);
        let criteria = Query::new().search("vehicle").criteria;
        let filtered = filter(&items, &criteria);
        let stats = StatusCounts::tally(filtered.iter().copied());
        assert_eq!(stats.total(), 200);
        assert_eq!(stats.get(AuditLevel::Critical), 50);
    }
}
