use std::sync::Arc;

use crate::models::{Listing, ListingsPage};
use crate::pagination::PageLinks;
use crate::source::FetchError;

/// Message shown in place of results when the fetch failed
pub const RESULTS_ERROR_MESSAGE: &str = "Error loading listings. Please try again later.";

/// Snapshot of one keyed query
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<FetchError>,
    /// Data is older than the freshness window; the next request refetches it
    pub is_stale: bool,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
            error: self.error.clone(),
            is_stale: self.is_stale,
        }
    }
}

impl<T> QueryState<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            error: None,
            is_stale: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::idle()
        }
    }

    pub fn success(data: Arc<T>) -> Self {
        Self {
            data: Some(data),
            ..Self::idle()
        }
    }

    pub fn stale(data: Arc<T>) -> Self {
        Self {
            data: Some(data),
            is_stale: true,
            ..Self::idle()
        }
    }

    pub fn failure(error: FetchError) -> Self {
        Self {
            is_error: true,
            error: Some(error),
            ..Self::idle()
        }
    }

    pub fn into_result(self) -> Option<Result<Arc<T>, FetchError>> {
        match (self.data, self.error) {
            (_, Some(err)) => Some(Err(err)),
            (Some(data), None) => Some(Ok(data)),
            (None, None) => None,
        }
    }
}

impl<T> From<Result<Arc<T>, FetchError>> for QueryState<T> {
    fn from(result: Result<Arc<T>, FetchError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err),
        }
    }
}

/// What the results area shows. An empty page is its own state, not an error.
#[derive(Debug, PartialEq)]
pub enum ResultsView<'a> {
    Loading,
    Error(&'static str),
    Empty,
    Listings {
        listings: &'a [Listing],
        /// Only present when there is more than one page
        pages: Option<PageLinks>,
    },
}

impl QueryState<ListingsPage> {
    pub fn view(&self) -> ResultsView<'_> {
        if self.is_error {
            return ResultsView::Error(RESULTS_ERROR_MESSAGE);
        }
        match self.data.as_deref() {
            None => ResultsView::Loading,
            Some(page) if page.data.is_empty() => ResultsView::Empty,
            Some(page) => {
                let pagination = &page.metadata.pagination;
                ResultsView::Listings {
                    listings: &page.data,
                    pages: (pagination.total_pages > 1).then(|| PageLinks::from_view(pagination)),
                }
            }
        }
    }
}
