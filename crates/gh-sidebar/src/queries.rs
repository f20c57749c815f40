//! Search filter builders
//!
//! The filter expressions the sidebar has always used. Organization
//! scoping is layered on top by `QuerySpec::org_scoped`, not here.

/// Open pull requests authored by the user
pub fn open_prs(username: &str) -> String {
    format!("author:{username} is:pr is:open archived:false")
}

/// Open pull requests waiting on the user's review
pub fn review_requests(username: &str) -> String {
    format!("review-requested:{username} is:pr is:open archived:false")
}

/// Open issues and pull requests assigned to the user
pub fn assignments(username: &str) -> String {
    format!("assignee:{username} is:open archived:false")
}
