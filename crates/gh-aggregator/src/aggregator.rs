//! Multi-cursor aggregation loop
//!
//! Walks 1..N independent search queries to exhaustion, one combined
//! round trip at a time, and returns the complete normalized result set
//! for each query name.

use std::collections::HashMap;

use gh_search_client::{SearchClient, SearchError};
use log::debug;

use crate::error::AggregateError;
use crate::query::QuerySpec;
use crate::work_item::WorkItem;

/// Default nodes-per-page for search queries
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Aggregates cursor-paginated search queries into complete result sets
#[derive(Debug, Clone)]
pub struct Aggregator<C> {
    client: C,
    page_size: u32,
}

impl<C: SearchClient> Aggregator<C> {
    /// Create an aggregator with the default page size
    pub fn new(client: C) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    /// Create an aggregator with a custom page size
    pub fn with_page_size(client: C, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Get a reference to the underlying search client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run every query to exhaustion and return its complete result set
    ///
    /// Each round trip carries one page request per still-unexhausted
    /// query; query names must therefore be unique within one call. A
    /// query drops out of the rotation as soon as its page reports no
    /// further pages, and its collected items stay untouched for the
    /// remaining rounds. Within one name, items keep API response order
    /// across pages. Any failure aborts the whole call; partial results
    /// are discarded, never returned.
    pub async fn collect(
        &self,
        mut specs: Vec<QuerySpec>,
    ) -> Result<HashMap<String, Vec<WorkItem>>, AggregateError> {
        let mut results: HashMap<String, Vec<WorkItem>> = HashMap::with_capacity(specs.len());
        let mut round = 0usize;

        while specs.iter().any(|spec| !spec.is_exhausted()) {
            round += 1;
            let requests = specs
                .iter()
                .filter(|spec| !spec.is_exhausted())
                .map(|spec| spec.page_request(self.page_size))
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                "Aggregation round {}: {} pending result sets",
                round,
                requests.len()
            );
            let mut pages = self.client.search(&requests).await?;

            for spec in specs.iter_mut().filter(|spec| !spec.is_exhausted()) {
                let page = pages.remove(spec.name()).ok_or_else(|| {
                    AggregateError::Search(SearchError::MissingResultSet {
                        name: spec.name().to_string(),
                    })
                })?;

                let items = results.entry(spec.name().to_string()).or_default();
                for node in page.nodes {
                    items.push(WorkItem::from_node(spec.name(), node)?);
                }

                spec.advance(&page.page_info)?;
            }
        }

        Ok(results)
    }

    /// Single-query convenience wrapper around [`collect`](Self::collect)
    pub async fn collect_one(&self, spec: QuerySpec) -> Result<Vec<WorkItem>, AggregateError> {
        let name = spec.name().to_string();
        let mut results = self.collect(vec![spec]).await?;
        Ok(results.remove(&name).unwrap_or_default())
    }
}
