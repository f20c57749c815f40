//! Search API wire types
//!
//! These types mirror the GraphQL search response shape. They are
//! intentionally separate from the normalized records the aggregator
//! hands to callers, so this crate stays pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page request for a named search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Logical result-set name (e.g. "open_prs")
    pub name: String,

    /// Search filter expression, passed through to the API untouched
    pub query: String,

    /// Cursor returned by the previous page, absent on the first call
    pub cursor: Option<String>,

    /// Number of nodes to request for this page
    pub page_size: u32,
}

/// A single search result node, discriminated by GraphQL `__typename`
///
/// The search API returns a mixed stream of issues and pull requests.
/// Decoding on the typename keeps the variant explicit instead of
/// probing zero-valued fields after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum SearchNode {
    /// An issue node
    Issue(NodeFields),

    /// A pull request node
    PullRequest(NodeFields),

    /// Node types the search can return but this client does not model
    #[serde(other)]
    Unknown,
}

/// Fields selected on both search node variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFields {
    /// Issue or PR number, unique within its repository
    pub number: u64,

    /// Title text
    pub title: String,

    /// Canonical web URL of the issue or PR
    pub url: String,

    /// Owning repository
    pub repository: RepositoryRef,

    /// Author, absent for deleted ("ghost") accounts
    pub author: Option<AuthorRef>,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last updated
    pub updated_at: DateTime<Utc>,
}

/// Repository reference carried on every node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Canonical web URL of the repository
    pub url: String,
}

/// Author reference carried on every node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author's login
    pub login: String,
}

/// Relay-style page info for one search connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more pages exist after this one
    pub has_next_page: bool,

    /// Cursor to resume from, when more pages exist
    pub end_cursor: Option<String>,
}

/// One page of one named search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Nodes in API response order
    pub nodes: Vec<SearchNode>,

    /// Pagination state after this page
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_issue_node() {
        let json = r#"{
            "__typename": "Issue",
            "number": 17,
            "title": "Broken link in docs",
            "url": "https://github.com/acme/widgets/issues/17",
            "repository": { "url": "https://github.com/acme/widgets" },
            "author": { "login": "alice" },
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-02T09:30:00Z"
        }"#;

        let node: SearchNode = serde_json::from_str(json).unwrap();
        match node {
            SearchNode::Issue(fields) => {
                assert_eq!(fields.number, 17);
                assert_eq!(fields.title, "Broken link in docs");
                assert_eq!(fields.author.unwrap().login, "alice");
                assert_eq!(fields.repository.url, "https://github.com/acme/widgets");
            }
            other => panic!("expected issue node, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_pull_request_node() {
        let json = r#"{
            "__typename": "PullRequest",
            "number": 42,
            "title": "Add retry logic",
            "url": "https://github.com/acme/widgets/pull/42",
            "repository": { "url": "https://github.com/acme/widgets" },
            "author": { "login": "bob" },
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-02T09:30:00Z"
        }"#;

        let node: SearchNode = serde_json::from_str(json).unwrap();
        assert!(matches!(node, SearchNode::PullRequest(ref f) if f.number == 42));
    }

    #[test]
    fn test_decode_ghost_author() {
        let json = r#"{
            "__typename": "Issue",
            "number": 3,
            "title": "Orphaned issue",
            "url": "https://github.com/acme/widgets/issues/3",
            "repository": { "url": "https://github.com/acme/widgets" },
            "author": null,
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-01T12:00:00Z"
        }"#;

        let node: SearchNode = serde_json::from_str(json).unwrap();
        assert!(matches!(node, SearchNode::Issue(ref f) if f.author.is_none()));
    }

    #[test]
    fn test_decode_unknown_typename() {
        let json = r#"{ "__typename": "Discussion" }"#;
        let node: SearchNode = serde_json::from_str(json).unwrap();
        assert!(matches!(node, SearchNode::Unknown));
    }

    #[test]
    fn test_decode_page_info_without_cursor() {
        let json = r#"{ "hasNextPage": false, "endCursor": null }"#;
        let info: PageInfo = serde_json::from_str(json).unwrap();
        assert!(!info.has_next_page);
        assert!(info.end_cursor.is_none());
    }

    #[test]
    fn test_decode_search_page() {
        let json = r#"{
            "nodes": [],
            "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjEwMA==" }
        }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(page.nodes.is_empty());
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjEwMA=="));
    }
}
