//! Aggregation error taxonomy

use gh_search_client::SearchError;
use thiserror::Error;

/// Errors surfaced by an aggregation call
///
/// Every variant aborts the whole aggregation; there is no
/// partial-success channel.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The underlying search round trip failed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// A node carried no usable identifier on either variant
    #[error("result set {name:?} returned a node without a usable identifier")]
    MalformedNode { name: String },

    /// An exhausted query was asked for another page
    #[error("result set {name:?} reported no further pages but was queried again")]
    ExhaustionMismatch { name: String },

    /// A page claimed more results without handing back a cursor
    #[error("result set {name:?} reports another page but returned no cursor")]
    MissingCursor { name: String },
}
