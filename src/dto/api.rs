//! Payloads of the `/api/v1` endpoints.

use serde::Serialize;

use crate::query::pagination::PageInfo;
use crate::repository::errors::ErrorKind;

/// Normalized list response.
#[derive(Debug, Serialize)]
pub struct ListResponse<T, St = ()> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<St>,
}

impl<T, St> ListResponse<T, St> {
    pub fn new(items: Vec<T>, info: PageInfo) -> Self {
        Self {
            items,
            total: info.total_items,
            page: info.page,
            per_page: info.per_page,
            total_pages: info.total_pages,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: St) -> Self {
        self.stats = Some(stats);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}
