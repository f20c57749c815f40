//! Sidebar data providers
//!
//! The chat frontend asks for three result sets at once (authored PRs,
//! review requests, assignments) to render the sidebar, and for single
//! result sets from individual panels. Both paths go through the
//! aggregator; this module wires names to filters and applies the
//! request deadline.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use gh_aggregator::{Aggregator, QuerySpec, WorkItem};
use gh_search_client::SearchClient;
use log::debug;

use crate::config::SidebarConfig;
use crate::queries;

/// Result-set name for pull requests authored by the user
pub const OPEN_PRS: &str = "open_prs";

/// Result-set name for pull requests awaiting the user's review
pub const REVIEW_REQUESTS: &str = "review_requests";

/// Result-set name for issues and PRs assigned to the user
pub const ASSIGNMENTS: &str = "assignments";

/// The three sidebar result sets
#[derive(Debug, Clone, Default)]
pub struct SidebarData {
    /// Open pull requests authored by the user
    pub open_prs: Vec<WorkItem>,

    /// Open pull requests waiting on the user's review
    pub review_requests: Vec<WorkItem>,

    /// Open issues and pull requests assigned to the user
    pub assignments: Vec<WorkItem>,
}

impl SidebarData {
    /// Per-set counts in sidebar display order
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.open_prs.len(),
            self.review_requests.len(),
            self.assignments.len(),
        )
    }
}

/// Provides sidebar result sets through one aggregator
pub struct SidebarProvider<C> {
    aggregator: Aggregator<C>,
    organization: Option<String>,
    timeout: Duration,
}

impl<C: SearchClient> SidebarProvider<C> {
    /// Create a provider from a search client and configuration
    pub fn new(client: C, config: &SidebarConfig) -> Self {
        Self {
            aggregator: Aggregator::with_page_size(client, config.page_size),
            organization: config.organization.clone(),
            timeout: config.request_timeout(),
        }
    }

    /// Fetch all three sidebar result sets in combined round trips
    pub async fn sidebar_data(&self, username: &str) -> Result<SidebarData> {
        debug!("Fetching sidebar data for {}", username);

        let specs = vec![
            self.spec(OPEN_PRS, queries::open_prs(username)),
            self.spec(REVIEW_REQUESTS, queries::review_requests(username)),
            self.spec(ASSIGNMENTS, queries::assignments(username)),
        ];
        let mut results = self.collect(specs).await?;

        Ok(SidebarData {
            open_prs: results.remove(OPEN_PRS).unwrap_or_default(),
            review_requests: results.remove(REVIEW_REQUESTS).unwrap_or_default(),
            assignments: results.remove(ASSIGNMENTS).unwrap_or_default(),
        })
    }

    /// Open pull requests authored by the user
    pub async fn your_open_prs(&self, username: &str) -> Result<Vec<WorkItem>> {
        debug!("Fetching open PRs for {}", username);
        self.collect_single(self.spec(OPEN_PRS, queries::open_prs(username)))
            .await
    }

    /// Open issues and pull requests assigned to the user
    pub async fn your_assignments(&self, username: &str) -> Result<Vec<WorkItem>> {
        debug!("Fetching assignments for {}", username);
        self.collect_single(self.spec(ASSIGNMENTS, queries::assignments(username)))
            .await
    }

    /// Build a query spec, applying the configured organization scope
    fn spec(&self, name: &str, filter: String) -> QuerySpec {
        match &self.organization {
            Some(org) => QuerySpec::org_scoped(name, filter, org),
            None => QuerySpec::new(name, filter),
        }
    }

    async fn collect(&self, specs: Vec<QuerySpec>) -> Result<HashMap<String, Vec<WorkItem>>> {
        tokio::time::timeout(self.timeout, self.aggregator.collect(specs))
            .await
            .context("search aggregation timed out")?
            .context("search aggregation failed")
    }

    async fn collect_single(&self, spec: QuerySpec) -> Result<Vec<WorkItem>> {
        tokio::time::timeout(self.timeout, self.aggregator.collect_one(spec))
            .await
            .context("search aggregation timed out")?
            .context("search aggregation failed")
    }
}
