//! GitHub search API client with combined multi-query round trips
//!
//! This crate is the seam between the aggregation core and the GitHub
//! GraphQL search API. The `SearchClient` trait models one batched round
//! trip: several named filter/cursor pairs go out, one page per name
//! comes back. `GraphqlSearchClient` is the direct implementation on top
//! of octocrab.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │              SearchClient trait            │
//! │  - search(&[PageRequest]) -> pages by name │
//! └────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌────────────────────────────────────────────┐
//! │            GraphqlSearchClient             │
//! │  (aliased search fields, one round trip)   │
//! └────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod graphql_client;
pub mod types;

pub use client::SearchClient;
pub use error::SearchError;
pub use graphql_client::GraphqlSearchClient;
pub use types::{
    AuthorRef, NodeFields, PageInfo, PageRequest, RepositoryRef, SearchNode, SearchPage,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
