use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::models::ListingsPage;
use crate::source::{FetchError, ListingsSource};

/// Listings API over HTTP: `GET {base}/listings?{query}`
pub struct HttpListingsSource {
    client: Client,
    endpoint: Url,
}

impl HttpListingsSource {
    /// Create a source for the default local API
    pub fn new() -> Result<Self> {
        Self::with_config(&BrowserConfig::default())
    }

    /// Create a source with custom endpoint, timeout and user agent
    pub fn with_config(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = config.listings_endpoint();
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("Invalid listings endpoint: {}", endpoint))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url_for(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        let query = query.strip_prefix('?').unwrap_or(query);
        url.set_query((!query.is_empty()).then_some(query));
        url
    }
}

#[async_trait]
impl ListingsSource for HttpListingsSource {
    async fn fetch(&self, query: &str) -> Result<ListingsPage, FetchError> {
        let url = self.url_for(query);
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Listings API returned status: {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let page: ListingsPage = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        info!(
            "Fetched {} listings (page {} of {})",
            page.data.len(),
            page.metadata.pagination.current_page + 1,
            page.metadata.pagination.total_pages
        );
        Ok(page)
    }

    fn source_name(&self) -> &'static str {
        "HTTP listings API"
    }
}
