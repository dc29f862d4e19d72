use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::filters::preview::PREVIEW_PAGE_SIZE;

/// Settings for talking to the listings API and caching its answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserConfig {
    /// API root, e.g. `http://localhost:3000/api`
    pub api_base_url: String,
    /// Path of the listings resource under the API root
    pub listings_path: String,
    pub request_timeout: Duration,
    pub user_agent: String,
    /// How long a results or preview page stays fresh
    pub results_stale_time: Duration,
    /// How long the distinct-cities list stays fresh
    pub cities_stale_time: Duration,
    /// Extra attempts after a failed fetch
    pub retries: u32,
    pub preview_page_size: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            listings_path: "/listings".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("listing-browser/", env!("CARGO_PKG_VERSION")).to_string(),
            results_stale_time: Duration::from_secs(5 * 60),
            cities_stale_time: Duration::from_secs(60 * 60),
            retries: 1,
            preview_page_size: PREVIEW_PAGE_SIZE,
        }
    }
}

impl BrowserConfig {
    /// Full URL of the listings resource, without a query
    pub fn listings_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.listings_path.trim_start_matches('/')
        )
    }
}
