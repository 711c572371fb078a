//! Pagination types for invoice search

use serde::{Deserialize, Serialize};

/// Fixed page size of the invoice search table
pub const INVOICES_PER_PAGE: u32 = 6;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to minimum of 1
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Pagination for the invoice search table.
    pub fn invoices(page: u32) -> Self {
        Self::new(page, INVOICES_PER_PAGE)
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// Number of pages needed for `total` rows. Never less than 1.
    pub fn total_pages(total: i64, per_page: u32) -> u32 {
        let per_page = i64::from(per_page.max(1));
        let pages = (total.max(0) + per_page - 1) / per_page;
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::invoices(1)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total pages for the search
    pub total_pages: u32,
}

/// Query parameters for invoice search: `?query=...&page=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}
