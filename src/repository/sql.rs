//! Small helpers shared by the Diesel query builders.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::query::criteria::DateRange;
use crate::query::pagination::PageRequest;

/// LIKE pattern matching `term` anywhere; `%`, `_` and `\` are escaped with `\`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Half-open timestamp bounds `[from 00:00, to + 1 day 00:00)` for an inclusive date range.
pub(crate) fn timestamp_bounds(
    range: &DateRange,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let start = range.from.map(|d| d.and_time(NaiveTime::MIN));
    let end = range
        .to
        .and_then(|d: NaiveDate| d.succ_opt())
        .map(|d| d.and_time(NaiveTime::MIN));
    (start, end)
}

/// `(limit, offset)` of a page window. Offsets beyond `i64::MAX` saturate so
/// far-away pages stay empty.
pub(crate) fn limit_offset(page: &PageRequest) -> (i64, i64) {
    let limit = i64::try_from(page.per_page).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}
