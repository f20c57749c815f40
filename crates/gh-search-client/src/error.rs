//! Search client error types

use thiserror::Error;

/// Errors raised while fetching one search round trip
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request failed at the network or HTTP layer
    #[error("GitHub API request failed: {0}")]
    Transport(#[from] octocrab::Error),

    /// The API answered but reported GraphQL-level errors
    #[error("GraphQL search failed: {message}")]
    Api { message: String },

    /// The response body did not match the expected shape
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A combined response was missing one of the requested result sets
    #[error("search response is missing result set {name:?}")]
    MissingResultSet { name: String },
}
