//! Sidebar data layer for the chat integration
//!
//! Ties the aggregation core to the GitHub-facing concerns the sidebar
//! needs: the canonical search filters, the three-way summary provider,
//! per-PR detail enrichment, and file-based configuration.

pub mod config;
pub mod details;
pub mod provider;
pub mod queries;

pub use config::SidebarConfig;
pub use details::{fetch_all_details, DetailClient, OctocrabDetailClient, PrDetail, PrReview};
pub use provider::{SidebarData, SidebarProvider, ASSIGNMENTS, OPEN_PRS, REVIEW_REQUESTS};
