use std::ops::Range;

use serde::Serialize;

use crate::domain::types::TypeConstraintError;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page sizes offered by the list screens.
pub const ALLOWED_PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Number of pages needed to show `total_items`.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Requested page window. `page` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Page `0` is treated as the first page; the page size must be one of
    /// [`ALLOWED_PAGE_SIZES`].
    pub fn new(page: usize, per_page: usize) -> Result<Self, TypeConstraintError> {
        if !ALLOWED_PAGE_SIZES.contains(&per_page) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "page size {per_page} is not allowed"
            )));
        }
        Ok(Self {
            page: page.max(1),
            per_page,
        })
    }

    pub fn first(per_page: usize) -> Result<Self, TypeConstraintError> {
        Self::new(1, per_page)
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }

    /// Slice bounds of this page inside a collection of `total` items.
    /// Pages past the end produce an empty range.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let start = self.offset().min(total);
        let end = start.saturating_add(self.per_page).min(total);
        start..end
    }
}

/// Totals needed to render page controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn new(request: PageRequest, total_items: usize) -> Self {
        Self {
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages: total_pages(total_items, request.per_page),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    // Pages past the end link back to the tail of the list.
    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of records plus the links shown under the table.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Page numbers to link to; `None` marks an ellipsis.
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub info: PageInfo,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        let info = PageInfo::new(request, total_items);
        let pages = get_pages(info.total_pages, info.page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: info.page,
            has_prev: info.has_prev(),
            has_next: info.has_next(),
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(200, 20), 10);
    }

    #[test]
    fn page_zero_is_first_page() {
        let request = PageRequest::new(0, 10).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 15).is_err());
    }

    #[test]
    fn bounds_cover_remainder_and_overflow() {
        let last = PageRequest::new(3, 10).unwrap();
        assert_eq!(last.bounds(25), 20..25);
        let beyond = PageRequest::new(4, 10).unwrap();
        assert_eq!(beyond.bounds(25), 25..25);
        let far = PageRequest::new(usize::MAX, 100).unwrap();
        assert!(far.bounds(25).is_empty());
    }

    #[test]
    fn page_links_collapse_with_gaps() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn paginated_reports_navigation() {
        let request = PageRequest::new(2, 10).unwrap();
        let page = Paginated::new(vec![1, 2, 3], request, 23);
        assert_eq!(page.info.total_pages, 3);
        assert!(page.has_prev);
        assert!(page.has_next);

        let last = Paginated::new(vec![1], PageRequest::new(3, 10).unwrap(), 23);
        assert!(!last.has_next);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = Paginated::<i32>::new(vec![], PageRequest::new(usize::MAX, 10).unwrap(), 25);
        assert_eq!(page.page, usize::MAX);
        assert!(page.has_prev);
        assert!(!page.has_next);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
    }
}
