//! Rental listings browser: URL-backed filter state, preview-derived filter bounds,
//! windowed pagination and a cached listings query layer.

pub mod config;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod present;
pub mod query;
pub mod source;

pub use config::BrowserConfig;
pub use filters::{FilterState, FilterStore, FilterUpdate, MemoryUrl, UrlState};
pub use query::{ListingsQuery, QueryState, ResultsView};
pub use source::{FetchError, HttpListingsSource, ListingsSource};
