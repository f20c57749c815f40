//! Sidebar configuration
//!
//! Loaded from gh-sidebar.toml in the working directory first, then
//! ~/.gh-sidebar.toml. Missing or unparseable files fall back to
//! defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "gh-sidebar.toml";
const HOME_CONFIG_FILE: &str = ".gh-sidebar.toml";

/// Configuration for the sidebar providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Restrict every search to one GitHub organization
    #[serde(default)]
    pub organization: Option<String>,

    /// Nodes requested per search page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Deadline for one whole aggregation call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Concurrent PR detail fetches
    #[serde(default = "default_max_concurrent_detail_fetches")]
    pub max_concurrent_detail_fetches: usize,
}

fn default_page_size() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_detail_fetches() -> usize {
    8
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            organization: None,
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_detail_fetches: default_max_concurrent_detail_fetches(),
        }
    }
}

impl SidebarConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded sidebar config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default sidebar config");
        Self::default()
    }

    /// The aggregation deadline as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load config file content from CWD first, then home directory
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(home_config) = home_config_path() {
        if let Ok(content) = std::fs::read_to_string(&home_config) {
            log::debug!("Loaded config from {}", home_config.display());
            return Some(content);
        }
    }

    None
}

/// Returns ~/.gh-sidebar.toml if HOME is set
fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(HOME_CONFIG_FILE))
}
