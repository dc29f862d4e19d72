use crate::models::ListingsPage;
use crate::source::FetchError;
use async_trait::async_trait;

/// Anything that can answer a listings query.
///
/// The filtering itself happens behind this seam; callers only hand over the query string.
#[async_trait]
pub trait ListingsSource: Send + Sync {
    /// Fetch one page of listings for `query` (no leading `?`; empty means unfiltered)
    async fn fetch(&self, query: &str) -> Result<ListingsPage, FetchError>;

    /// Get the name of the listings source
    fn source_name(&self) -> &'static str;
}
