//! Pagination types
//!
//! Defines the page selector, the paginated outcome, and the continuation
//! rule shared by the orchestration code.

use crate::error::Result;
use crate::http::ApiResponse;
use crate::types::JsonValue;

/// Number of items the API returns per full page
pub const PAGE_SIZE: usize = 100;

/// Query parameter carrying the page number
pub(crate) const PAGE_PARAM: &str = "page";

/// Which page(s) of a resource a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Fetch every page and collapse the results
    #[default]
    All,
    /// Fetch a single page by number (pages start at 1)
    Number(u32),
}

impl Page {
    /// Check whether this targets every page
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Outcome of a paginated call
#[derive(Debug, Clone)]
pub enum Paginated {
    /// The raw response of a single-page request
    Single(ApiResponse),
    /// Items from every page, in ascending page order
    All(Vec<JsonValue>),
}

impl Paginated {
    /// Items collected by an all-pages fetch
    pub fn items(&self) -> Option<&[JsonValue]> {
        match self {
            Self::All(items) => Some(items),
            Self::Single(_) => None,
        }
    }

    /// Raw response from a single-page fetch
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Single(response) => Some(response),
            Self::All(_) => None,
        }
    }
}

/// A page outcome tagged with the page number that produced it
///
/// Tagging happens at fetch time so batch results can be ordered by page
/// number after the fact, never by completion order.
pub(crate) struct PageOutcome {
    pub(crate) page: u32,
    pub(crate) outcome: Result<ApiResponse>,
}

/// More pages are suspected exactly while every page so far came back full
pub(crate) fn has_more_pages(total_items: usize, pages_fetched: usize) -> bool {
    total_items == pages_fetched * PAGE_SIZE
}
