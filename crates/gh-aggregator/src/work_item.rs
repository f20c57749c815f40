//! Normalized work item records

use chrono::{DateTime, Utc};
use gh_search_client::{NodeFields, SearchNode};
use serde::{Deserialize, Serialize};

use crate::error::AggregateError;

/// A normalized issue-or-pull-request record
///
/// Both search node variants collapse into this one shape, so callers
/// never branch on where an item came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Issue or PR number, unique within its repository
    pub number: u64,

    /// URL of the owning repository
    pub repository_url: String,

    /// Title text
    pub title: String,

    /// Author's login, empty for deleted ("ghost") accounts
    pub author: String,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last updated
    pub updated_at: DateTime<Utc>,

    /// Canonical web URL of the item
    pub html_url: String,
}

impl WorkItem {
    /// Normalize one search node from the result set `name`
    ///
    /// A node without a usable identifier (zero number, or a typename
    /// this client does not model) is rejected instead of being emitted
    /// as a zero-valued record.
    pub fn from_node(name: &str, node: SearchNode) -> Result<Self, AggregateError> {
        match node {
            SearchNode::Issue(fields) | SearchNode::PullRequest(fields) => {
                Self::from_fields(name, fields)
            }
            SearchNode::Unknown => Err(AggregateError::MalformedNode {
                name: name.to_string(),
            }),
        }
    }

    fn from_fields(name: &str, fields: NodeFields) -> Result<Self, AggregateError> {
        if fields.number == 0 {
            return Err(AggregateError::MalformedNode {
                name: name.to_string(),
            });
        }

        Ok(Self {
            number: fields.number,
            repository_url: fields.repository.url,
            title: fields.title,
            author: fields.author.map(|a| a.login).unwrap_or_default(),
            created_at: fields.created_at,
            updated_at: fields.updated_at,
            html_url: fields.url,
        })
    }
}
