//! Concurrent page fetching and collapse
//!
//! # Overview
//!
//! The remote API pages every collection at [`PAGE_SIZE`] items and never
//! reports a total, so the only continuation signal is the item count: as
//! long as every page so far came back full, more pages are suspected.
//!
//! An all-pages fetch runs in rounds. Page 1 goes out alone and decides
//! whether pagination continues at all; afterwards the next `max_concurrency`
//! page numbers are fetched as one concurrent batch, bounded by
//! `buffer_unordered`. Every outcome of a batch is collected and sorted by
//! page number before any decision is made, so the result is deterministic
//! whatever the completion order: the lowest-numbered failed page's error
//! wins, or the items of all pages are concatenated in page order. One
//! failed page discards everything; partial results never escape.

mod types;

pub use types::{Page, Paginated, PAGE_SIZE};

use crate::config::EndpointConfig;
use crate::error::Result;
use crate::http::{build_request, ApiClient};
use crate::options::{CallOptions, ResolvedCallOptions};
use crate::types::{JsonValue, Method, StringMap};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use types::{has_more_pages, PageOutcome, PAGE_PARAM};


// ============================================================================
// Pagination Entry Points
// ============================================================================

impl ApiClient {
    /// Fetch one page or every page of a resource
    ///
    /// With `page` set to a number, the request goes out once with that
    /// `page=<n>` query parameter and the raw response comes back as
    /// [`Paginated::Single`]. With the all-pages selector (the default),
    /// every page is fetched and collapsed into [`Paginated::All`].
    pub async fn fetch_paginated(
        &self,
        client: &str,
        method: Method,
        path: &str,
        query: &StringMap,
        options: &CallOptions,
    ) -> Result<Paginated> {
        let resolved = self.resolve_options(client, options)?;
        match resolved.page {
            Page::Number(page) => {
                let config = self.registry().resolve(client)?;
                let outcome = self
                    .fetch_page(client, config, method, path, query, &resolved, page)
                    .await;
                Ok(Paginated::Single(outcome.outcome?))
            }
            Page::All => {
                let items = self
                    .fetch_all_pages(client, method, path, query, &resolved)
                    .await?;
                Ok(Paginated::All(items))
            }
        }
    }

    /// Fetch every page of a resource, whatever the page option says
    pub async fn fetch_all(
        &self,
        client: &str,
        method: Method,
        path: &str,
        query: &StringMap,
        options: &CallOptions,
    ) -> Result<Vec<JsonValue>> {
        let resolved = self.resolve_options(client, options)?;
        self.fetch_all_pages(client, method, path, query, &resolved)
            .await
    }

    /// Drive the all-pages fetch loop
    ///
    /// All-or-nothing: the first error (by page number, not completion
    /// order) ends the call and discards every fetched item. In-flight
    /// siblings of a failed page are joined, not aborted; their results are
    /// dropped and no further batch is launched.
    async fn fetch_all_pages(
        &self,
        client: &str,
        method: Method,
        path: &str,
        query: &StringMap,
        options: &ResolvedCallOptions,
    ) -> Result<Vec<JsonValue>> {
        let config = self.registry().resolve(client)?;

        // Page 1 goes out alone; its outcome decides whether the batched
        // rounds start at all.
        let first = self
            .fetch_page(client, config, method, path, query, options, 1)
            .await;
        let response = first.outcome?;
        let mut items = self.decode_page(&response)?;
        debug!("Page 1: {} items", items.len());

        let mut pages_fetched: usize = 1;
        let mut next_page: u32 = 2;
        let batch_size = options.max_concurrency as u32;

        while has_more_pages(items.len(), pages_fetched) {
            let last_page = next_page + batch_size - 1;
            debug!("Fetching pages {next_page}..={last_page} from {client}{path}");

            let mut outcomes: Vec<PageOutcome> = stream::iter(next_page..=last_page)
                .map(|page| self.fetch_page(client, config, method, path, query, options, page))
                .buffer_unordered(options.max_concurrency)
                .collect()
                .await;
            outcomes.sort_by_key(|outcome| outcome.page);

            for outcome in outcomes {
                let response = match outcome.outcome {
                    Ok(response) => response,
                    Err(err) => {
                        warn!("Page {} failed: {err}", outcome.page);
                        return Err(err);
                    }
                };
                match self.decode_page(&response) {
                    Ok(page_items) => {
                        debug!("Page {}: {} items", outcome.page, page_items.len());
                        items.extend(page_items);
                        pages_fetched += 1;
                    }
                    Err(err) => {
                        warn!("Page {} failed to decode: {err}", outcome.page);
                        return Err(err);
                    }
                }
            }

            next_page += batch_size;
        }

        Ok(items)
    }

    /// Fetch one page, tagging the outcome with its page number
    #[allow(clippy::too_many_arguments)]
    async fn fetch_page(
        &self,
        client: &str,
        config: &EndpointConfig,
        method: Method,
        path: &str,
        query: &StringMap,
        options: &ResolvedCallOptions,
        page: u32,
    ) -> PageOutcome {
        let mut query = query.clone();
        query.insert(PAGE_PARAM.to_string(), page.to_string());

        let outcome = match build_request(config, method, path, &query, options) {
            Ok(request) => self.execute(client, &request, options).await,
            Err(err) => Err(err),
        };

        PageOutcome { page, outcome }
    }
}
