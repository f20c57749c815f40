//! Search client trait
//!
//! Defines the interface the aggregation core uses to talk to the
//! external search API. Implementations can be direct (hitting the API)
//! or scripted for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{PageRequest, SearchPage};

/// Cursor-paginated search client
///
/// One call issues a single round trip carrying every request in
/// `requests` and returns one page per request, keyed by the request's
/// logical name. A single-query fetch is simply the one-element case.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch one page for each named search request in one round trip
    ///
    /// # Arguments
    ///
    /// * `requests` - Named filter/cursor pairs, one per result set
    ///
    /// # Returns
    ///
    /// One page per request keyed by its logical name, or the first
    /// error encountered. Implementations must answer every request or
    /// fail the whole call; a partially filled map is never returned.
    async fn search(
        &self,
        requests: &[PageRequest],
    ) -> Result<HashMap<String, SearchPage>, SearchError>;
}
