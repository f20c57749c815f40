//! Pull request detail enrichment
//!
//! The sidebar list only carries the normalized work item fields; the PR
//! panel also needs review state, mergeability and CI status. Details
//! are fetched per item, concurrently with a bounded parallel map whose
//! output order matches input order.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use gh_aggregator::WorkItem;
use log::debug;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

/// One review on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrReview {
    /// Reviewer's login, empty for deleted accounts
    pub author: String,

    /// Review state as reported by the API (e.g. "APPROVED")
    pub state: String,

    /// When the review was submitted, absent for pending reviews
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Enriched detail record for one pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrDetail {
    /// Canonical web URL of the pull request
    pub url: String,

    /// Pull request number
    pub number: u64,

    /// Combined commit status of the head SHA ("success", "pending", ...)
    pub status: String,

    /// Whether GitHub considers the PR mergeable
    pub mergeable: bool,

    /// Logins of reviewers whose review is still requested
    pub requested_reviewers: Vec<String>,

    /// Reviews already given
    pub reviews: Vec<PrReview>,
}

/// Fetches the enrichment data for a single pull request
#[async_trait]
pub trait DetailClient: Send + Sync {
    /// Fetch the detail record for one pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `number` - Pull request number
    /// * `url` - Canonical web URL, echoed back on the detail record
    async fn fetch_detail(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        url: &str,
    ) -> Result<PrDetail>;
}

/// Enrich every work item, preserving input order in the output
///
/// Fetches run concurrently, at most `max_concurrent` in flight. The
/// call returns only once every fetch has finished, and any single
/// failure fails the whole batch.
pub async fn fetch_all_details<C: DetailClient>(
    client: &C,
    items: &[WorkItem],
    max_concurrent: usize,
) -> Result<Vec<PrDetail>> {
    stream::iter(items)
        .map(|item| async move {
            let (owner, repo) = repo_from_url(&item.repository_url)?;
            client
                .fetch_detail(owner, repo, item.number, &item.html_url)
                .await
        })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await
}

/// Split "https://github.com/{owner}/{repo}" into owner and repo
fn repo_from_url(url: &str) -> Result<(&str, &str)> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let repo = segments.next().filter(|s| !s.is_empty());
    let owner = segments.next().filter(|s| !s.is_empty() && !s.contains(':'));

    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        _ => Err(anyhow!("cannot extract owner/repo from {url:?}")),
    }
}

/// Direct octocrab-backed detail client
#[derive(Debug, Clone)]
pub struct OctocrabDetailClient {
    octocrab: Arc<Octocrab>,
}

/// Review payload from `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Debug, Deserialize)]
struct ReviewPayload {
    user: Option<UserPayload>,
    state: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
}

impl OctocrabDetailClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    async fn fetch_reviews(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<PrReview>> {
        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, number);
        let reviews: Vec<ReviewPayload> = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .context("could not list reviews")?;

        Ok(reviews
            .into_iter()
            .map(|review| PrReview {
                author: review.user.map(|u| u.login).unwrap_or_default(),
                state: review.state.unwrap_or_else(|| "PENDING".to_string()),
                submitted_at: review.submitted_at,
            })
            .collect())
    }

    async fn fetch_pr_state(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<(String, bool, Vec<String>)> {
        let pr = self
            .octocrab
            .pulls(owner, repo)
            .get(number)
            .await
            .context("could not fetch pull request")?;

        let mergeable = pr.mergeable.unwrap_or(false);
        let requested_reviewers = pr
            .requested_reviewers
            .unwrap_or_default()
            .into_iter()
            .map(|user| user.login)
            .collect();

        // Use a raw GET since octocrab's Reference type doesn't support commit SHAs
        let route = format!("/repos/{}/{}/commits/{}/status", owner, repo, pr.head.sha);
        let combined: octocrab::models::CombinedStatus =
            self.octocrab.get(route, None::<&()>).await?;

        Ok((status_label(&combined.state), mergeable, requested_reviewers))
    }
}

#[async_trait]
impl DetailClient for OctocrabDetailClient {
    async fn fetch_detail(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        url: &str,
    ) -> Result<PrDetail> {
        debug!("Fetching PR details for {}/{}#{}", owner, repo, number);

        let (reviews, (status, mergeable, requested_reviewers)) = tokio::try_join!(
            self.fetch_reviews(owner, repo, number),
            self.fetch_pr_state(owner, repo, number),
        )?;

        Ok(PrDetail {
            url: url.to_string(),
            number,
            status,
            mergeable,
            requested_reviewers,
            reviews,
        })
    }
}

/// Convert octocrab StatusState to the wire label the frontend expects
fn status_label(state: &octocrab::models::StatusState) -> String {
    match state {
        octocrab::models::StatusState::Success => "success",
        octocrab::models::StatusState::Pending => "pending",
        octocrab::models::StatusState::Failure => "failure",
        octocrab::models::StatusState::Error => "error",
        _ => "pending",
    }
    .to_string()
}
