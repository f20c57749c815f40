//! Query specifications
//!
//! A `QuerySpec` is one named, independently paginated search filter.
//! The filter text is fixed at construction; only the cursor advances as
//! pages are consumed.

use gh_search_client::{PageInfo, PageRequest};

use crate::error::AggregateError;

/// One named search query and its pagination state
#[derive(Debug, Clone)]
pub struct QuerySpec {
    name: String,
    query: String,
    cursor: Option<String>,
    exhausted: bool,
}

impl QuerySpec {
    /// Create a spec for a raw search filter expression
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            cursor: None,
            exhausted: false,
        }
    }

    /// Create a spec whose filter is restricted to one organization
    ///
    /// The `org:` clause is prepended exactly once here; pagination never
    /// touches the filter text again.
    pub fn org_scoped(name: impl Into<String>, query: impl AsRef<str>, org: &str) -> Self {
        Self::new(name, format!("org:{} {}", org, query.as_ref()))
    }

    /// Logical result-set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The filter expression sent to the API
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether this query has reported its final page
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Build the request for this spec's next page
    ///
    /// Asking an exhausted spec for another page is a bug in the caller's
    /// pagination loop and fails loudly instead of re-issuing the query.
    pub(crate) fn page_request(&self, page_size: u32) -> Result<PageRequest, AggregateError> {
        if self.exhausted {
            return Err(AggregateError::ExhaustionMismatch {
                name: self.name.clone(),
            });
        }

        Ok(PageRequest {
            name: self.name.clone(),
            query: self.query.clone(),
            cursor: self.cursor.clone(),
            page_size,
        })
    }

    /// Advance the cursor from a freshly consumed page
    pub(crate) fn advance(&mut self, page_info: &PageInfo) -> Result<(), AggregateError> {
        if !page_info.has_next_page {
            self.exhausted = true;
            return Ok(());
        }

        match &page_info.end_cursor {
            Some(cursor) => {
                self.cursor = Some(cursor.clone());
                Ok(())
            }
            None => Err(AggregateError::MissingCursor {
                name: self.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_scoping_applied_once_at_construction() {
        let spec = QuerySpec::org_scoped("open_prs", "is:pr is:open", "acme");
        assert_eq!(spec.query(), "org:acme is:pr is:open");
        assert_eq!(spec.query().matches("org:acme").count(), 1);
    }

    #[test]
    fn test_unscoped_filter_is_untouched() {
        let spec = QuerySpec::new("open_prs", "author:alice is:pr is:open");
        assert_eq!(spec.query(), "author:alice is:pr is:open");
    }

    #[test]
    fn test_filter_survives_cursor_advancement() {
        let mut spec = QuerySpec::org_scoped("open_prs", "is:pr is:open", "acme");

        for cursor in ["c1", "c2", "c3"] {
            spec.advance(&PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor.to_string()),
            })
            .unwrap();
            assert_eq!(spec.query().matches("org:acme").count(), 1);
        }

        let request = spec.page_request(100).unwrap();
        assert_eq!(request.query, "org:acme is:pr is:open");
        assert_eq!(request.cursor.as_deref(), Some("c3"));
    }

    #[test]
    fn test_exhausted_spec_refuses_another_page() {
        let mut spec = QuerySpec::new("open_prs", "is:pr is:open");
        spec.advance(&PageInfo {
            has_next_page: false,
            end_cursor: None,
        })
        .unwrap();

        assert!(spec.is_exhausted());
        let err = spec.page_request(100).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::ExhaustionMismatch { ref name } if name == "open_prs"
        ));
    }

    #[test]
    fn test_next_page_without_cursor_is_an_error() {
        let mut spec = QuerySpec::new("open_prs", "is:pr is:open");
        let err = spec
            .advance(&PageInfo {
                has_next_page: true,
                end_cursor: None,
            })
            .unwrap_err();

        assert!(matches!(err, AggregateError::MissingCursor { .. }));
    }
}
