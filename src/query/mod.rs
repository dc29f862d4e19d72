//! Cached access to the listings API.

pub mod cache;
pub mod state;

pub use cache::QueryCache;
pub use state::{QueryState, ResultsView, RESULTS_ERROR_MESSAGE};

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::filters::options::extract_cities;
use crate::filters::preview::preview_query_with_page_size;
use crate::filters::{derive_filter_options, DynamicFilterOptions, FilterState};
use crate::models::{Listing, ListingsPage};
use crate::source::{FetchError, ListingsSource};

/// Cache key. Results and previews live in separate namespaces even when their query
/// strings coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Results(String),
    Preview(String),
    Cities,
}

/// Listings query facade over a [`ListingsSource`].
///
/// Identical keys share one in-flight request and one cached result. Keys are compared
/// as exact strings; reordered parameters are a different key.
pub struct ListingsQuery<S: ListingsSource> {
    source: Arc<S>,
    listings: QueryCache<QueryKey, ListingsPage>,
    cities: QueryCache<QueryKey, Vec<String>>,
    retries: u32,
    preview_page_size: u32,
}

impl<S: ListingsSource> ListingsQuery<S> {
    pub fn new(source: S, config: &BrowserConfig) -> Self {
        Self {
            source: Arc::new(source),
            listings: QueryCache::new(config.results_stale_time),
            cities: QueryCache::new(config.cities_stale_time),
            retries: config.retries,
            preview_page_size: config.preview_page_size,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Results for the committed URL query
    pub async fn results(&self, query: &str) -> QueryState<ListingsPage> {
        let key = QueryKey::Results(query.to_string());
        self.listings
            .get_or_fetch(&key, move || self.fetch_with_retry(query))
            .await
            .into()
    }

    /// Preview set for a draft-derived query; only used to bound filter controls
    pub async fn preview(&self, query: &str) -> QueryState<ListingsPage> {
        let key = QueryKey::Preview(query.to_string());
        self.listings
            .get_or_fetch(&key, move || self.fetch_with_retry(query))
            .await
            .into()
    }

    /// Builds the preview query for `draft`, fetches it and derives the control bounds.
    ///
    /// A failed preview yields the default bounds.
    pub async fn preview_options(&self, draft: &FilterState) -> DynamicFilterOptions {
        let query = preview_query_with_page_size(draft, self.preview_page_size);
        match self.preview(&query).await.into_result() {
            Some(Ok(page)) => derive_filter_options(&page.data),
            Some(Err(err)) => {
                warn!("Preview fetch failed, using default filter bounds: {}", err);
                DynamicFilterOptions::default()
            }
            None => DynamicFilterOptions::default(),
        }
    }

    /// Distinct cities across all listings, sorted
    pub async fn cities(&self) -> QueryState<Vec<String>> {
        self.cities
            .get_or_fetch(&QueryKey::Cities, move || async move {
                let page = self.fetch_with_retry("").await?;
                Ok::<_, FetchError>(extract_cities(&page.data))
            })
            .await
            .into()
    }

    /// Looks a listing up by reference id. `Ok(None)` means not found.
    pub async fn find_listing(&self, reference_id: &str) -> Result<Option<Listing>, FetchError> {
        let query = format!("pageSize={}", self.preview_page_size);
        let key = QueryKey::Results(query.clone());
        let query = query.as_str();
        let page = self
            .listings
            .get_or_fetch(&key, move || self.fetch_with_retry(query))
            .await?;
        Ok(page
            .data
            .iter()
            .find(|listing| listing.reference_id == reference_id)
            .cloned())
    }

    /// Current state of the results query without starting a request
    pub fn peek_results(&self, query: &str) -> QueryState<ListingsPage> {
        self.listings.peek(&QueryKey::Results(query.to_string()))
    }

    pub fn peek_preview(&self, query: &str) -> QueryState<ListingsPage> {
        self.listings.peek(&QueryKey::Preview(query.to_string()))
    }

    async fn fetch_with_retry(&self, query: &str) -> Result<ListingsPage, FetchError> {
        let mut attempt = 0;
        loop {
            debug!(
                "Requesting listings from {} (attempt {}): {:?}",
                self.source.source_name(),
                attempt + 1,
                query
            );
            match self.source.fetch(query).await {
                Ok(page) => return Ok(page),
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    info!("Retrying listings fetch after error: {}", err);
                }
                Err(err) => {
                    warn!("Listings fetch failed: {}", err);
                    return Err(err);
                }
            }
        }
    }
}
