//! GraphQL-backed search client
//!
//! Issues combined search queries against the GitHub GraphQL API using
//! octocrab. Each round trip aliases one `search` field per request
//! (`rs0`, `rs1`, ...) so every pending cursor advances in a single
//! request/response.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::types::{PageRequest, SearchPage};

/// Node fields selected for both search node variants
const NODE_SELECTION: &str =
    "number title url createdAt updatedAt repository { url } author { login }";

/// Direct search client on top of the GitHub GraphQL API
#[derive(Debug, Clone)]
pub struct GraphqlSearchClient {
    octocrab: Arc<Octocrab>,
}

impl GraphqlSearchClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Build the combined query document and variables for one round trip
///
/// Filter strings and cursors travel as GraphQL variables (`$q0`/`$c0`,
/// `$q1`/`$c1`, ...), so filter text never needs escaping into the
/// document itself. Aliases are positional; the response is mapped back
/// to request names by index.
fn build_document(requests: &[PageRequest]) -> (String, Value) {
    let mut declarations = Vec::with_capacity(requests.len() * 2);
    let mut body = String::new();
    let mut variables = Map::new();

    for (i, request) in requests.iter().enumerate() {
        declarations.push(format!("$q{i}: String!"));
        declarations.push(format!("$c{i}: String"));
        variables.insert(format!("q{i}"), Value::from(request.query.clone()));
        variables.insert(
            format!("c{i}"),
            request.cursor.clone().map_or(Value::Null, Value::from),
        );

        let _ = write!(
            body,
            " rs{i}: search(first: {size}, after: $c{i}, query: $q{i}, type: ISSUE) {{ \
             nodes {{ __typename ... on Issue {{ {sel} }} ... on PullRequest {{ {sel} }} }} \
             pageInfo {{ hasNextPage endCursor }} }}",
            size = request.page_size,
            sel = NODE_SELECTION,
        );
    }

    let document = format!("query({}) {{{} }}", declarations.join(", "), body);
    (document, Value::Object(variables))
}

#[async_trait]
impl SearchClient for GraphqlSearchClient {
    async fn search(
        &self,
        requests: &[PageRequest],
    ) -> Result<HashMap<String, SearchPage>, SearchError> {
        let (document, variables) = build_document(requests);
        debug!("Issuing combined search for {} result sets", requests.len());

        let response: GraphqlResponse = self
            .octocrab
            .graphql(&json!({ "query": document, "variables": variables }))
            .await?;

        if let Some(errors) = response.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SearchError::Api { message });
        }

        let mut data = match response.data {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(SearchError::Api {
                    message: "response carried neither data nor errors".to_string(),
                })
            }
        };

        let mut pages = HashMap::with_capacity(requests.len());
        for (i, request) in requests.iter().enumerate() {
            let value = data
                .remove(&format!("rs{i}"))
                .ok_or_else(|| SearchError::MissingResultSet {
                    name: request.name.clone(),
                })?;
            let page: SearchPage = serde_json::from_value(value)?;
            debug!(
                "Result set {:?}: {} nodes, has_next_page={}",
                request.name,
                page.nodes.len(),
                page.page_info.has_next_page
            );
            pages.insert(request.name.clone(), page);
        }

        Ok(pages)
    }
}
