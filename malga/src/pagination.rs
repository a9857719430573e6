//! Paginated listing parameters and responses.
//!
//! List endpoints accept flat query strings. Every parameter type implements
//! [`QueryPairs`], which yields only the keys that are actually set: `None`
//! values and `false` flags never reach the wire.

use serde::{Deserialize, Serialize};

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sort {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl Sort {
    /// Wire representation of the sort direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Flattens a parameter struct into query-string pairs.
pub trait QueryPairs {
    /// Returns the set parameters in a stable order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Base page, limit and sort parameters shared by every listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort direction.
    pub sort: Option<Sort>,
}

impl ListParams {
    /// Creates empty list parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: None,
            limit: None,
            sort: None,
        }
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl QueryPairs for ListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        // Page 0 is falsy on the remote side and gets dropped.
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_owned()));
        }
        pairs
    }
}

/// Pagination metadata returned next to the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Items across all pages.
    pub total_items: u64,
    /// Items on this page.
    pub item_count: u64,
    /// Page size.
    pub items_per_page: u64,
    /// Number of pages.
    pub total_pages: u64,
    /// This page number.
    pub current_page: u64,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: PageMeta,
}
