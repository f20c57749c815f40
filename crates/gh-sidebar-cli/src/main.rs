//! Command-line front end for the sidebar providers
//!
//! Prints the same result sets the chat sidebar renders, which makes it
//! handy for checking filters and tokens without a chat server around.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gh_aggregator::WorkItem;
use gh_search_client::GraphqlSearchClient;
use gh_sidebar::{fetch_all_details, OctocrabDetailClient, SidebarConfig, SidebarProvider};
use log::info;
use octocrab::Octocrab;

#[derive(Parser)]
#[command(
    name = "gh-sidebar",
    about = "GitHub sidebar summaries: your PRs, review requests and assignments",
    version
)]
struct Cli {
    /// GitHub username to query for
    #[arg(short, long)]
    user: String,

    /// Restrict searches to one organization (overrides config)
    #[arg(long)]
    org: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// All three sidebar result sets (default)
    Sidebar,
    /// Open pull requests you authored
    Prs {
        /// Also fetch review and CI details per PR
        #[arg(long)]
        details: bool,
    },
    /// Open issues and pull requests assigned to you
    Assignments,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = SidebarConfig::load();
    if cli.org.is_some() {
        config.organization = cli.org.clone();
    }

    let token = resolve_token()?;
    let octocrab = Arc::new(
        Octocrab::builder()
            .personal_token(token)
            .build()
            .context("failed to build GitHub client")?,
    );

    let provider = SidebarProvider::new(GraphqlSearchClient::new(Arc::clone(&octocrab)), &config);

    match cli.command.unwrap_or(Command::Sidebar) {
        Command::Sidebar => {
            let data = provider.sidebar_data(&cli.user).await?;
            info!("Sidebar data fetched for {}", cli.user);
            print_section("Open pull requests", &data.open_prs);
            print_section("Review requests", &data.review_requests);
            print_section("Assignments", &data.assignments);
        }
        Command::Prs { details } => {
            let items = provider.your_open_prs(&cli.user).await?;
            print_section("Open pull requests", &items);

            if details {
                let detail_client = OctocrabDetailClient::new(octocrab);
                let details = fetch_all_details(
                    &detail_client,
                    &items,
                    config.max_concurrent_detail_fetches,
                )
                .await?;
                for detail in details {
                    println!(
                        "  #{}: status={} mergeable={} reviews={} awaiting={}",
                        detail.number,
                        detail.status,
                        detail.mergeable,
                        detail.reviews.len(),
                        detail.requested_reviewers.join(", ")
                    );
                }
            }
        }
        Command::Assignments => {
            print_section("Assignments", &provider.your_assignments(&cli.user).await?);
        }
    }

    Ok(())
}

/// GITHUB_TOKEN first, then GH_TOKEN
fn resolve_token() -> Result<String> {
    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(key) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }
    bail!("no GitHub token found; set GITHUB_TOKEN or GH_TOKEN")
}

fn print_section(title: &str, items: &[WorkItem]) {
    println!("{} ({})", title, items.len());
    for item in items {
        println!("  #{} {} - {}", item.number, item.title, item.html_url);
    }
    println!();
}
