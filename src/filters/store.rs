use chrono::NaiveDate;
use tracing::{debug, info};

use super::params::QueryString;
use super::preview::preview_query_string;
use super::{FilterState, FilterUpdate};
use crate::models::ShareType;

/// The browser location: the only persisted state.
pub trait UrlState {
    /// Path the listings live under, e.g. `/listings`
    fn base_path(&self) -> &str;

    /// Current query, without the leading `?`
    fn query(&self) -> &str;

    /// Replaces the current location's query. An empty query is the bare base path.
    fn navigate(&mut self, query: &str);

    fn href(&self) -> String {
        if self.query().is_empty() {
            self.base_path().to_string()
        } else {
            format!("{}?{}", self.base_path(), self.query())
        }
    }
}

/// In-process location with a navigation history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryUrl {
    base_path: String,
    query: String,
    history: Vec<String>,
}

impl MemoryUrl {
    pub fn new(base_path: impl Into<String>, query: &str) -> Self {
        Self {
            base_path: base_path.into(),
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
            history: Vec::new(),
        }
    }

    /// Every href navigated to, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl UrlState for MemoryUrl {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn navigate(&mut self, query: &str) {
        self.query = query.to_string();
        let href = self.href();
        self.history.push(href);
    }
}

/// Owns the draft filter values and moves them to and from the URL.
///
/// Edits only touch the draft. The URL changes on [`FilterStore::apply_filters`],
/// [`FilterStore::reset_filters`] and [`FilterStore::go_to_page`].
#[derive(Debug)]
pub struct FilterStore<U: UrlState> {
    url: U,
    draft: FilterState,
    page_size: Option<u32>,
    calendar_open: bool,
}

impl<U: UrlState> FilterStore<U> {
    /// Builds the store, seeding the draft from the URL
    pub fn load(url: U) -> Self {
        let mut store = Self {
            url,
            draft: FilterState::default(),
            page_size: None,
            calendar_open: false,
        };
        let query = store.url.query().to_string();
        store.init_from_url(&query);
        store
    }

    /// Replaces the draft with the filters found in `query`
    pub fn init_from_url(&mut self, query: &str) {
        let parsed = QueryString::parse(query);
        debug!(
            "Loaded {} active filter(s) from URL",
            parsed.filters.active_filter_count()
        );
        self.draft = parsed.filters;
        self.page_size = parsed.page_size;
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    pub fn url(&self) -> &U {
        &self.url
    }

    pub fn set_field(&mut self, update: FilterUpdate) {
        self.draft.apply(update);
    }

    pub fn toggle_share_type(&mut self, share_type: ShareType) {
        self.draft.toggle_share_type(share_type);
    }

    /// Sets the move-in date and closes the date picker
    pub fn handle_select_date(&mut self, date: Option<NaiveDate>) {
        self.draft.move_in_date = date;
        self.calendar_open = false;
    }

    pub fn calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn set_calendar_open(&mut self, open: bool) {
        self.calendar_open = open;
    }

    pub fn active_filter_count(&self) -> usize {
        self.draft.active_filter_count()
    }

    /// Commits the draft to the URL, back on the first page. Returns the new href.
    pub fn apply_filters(&mut self) -> String {
        let query = QueryString {
            filters: self.draft.clone(),
            page: 0,
            page_size: self.page_size,
        }
        .encode();
        self.url.navigate(&query);
        let href = self.url.href();
        info!("Applied filters: {}", href);
        href
    }

    /// Clears the draft and navigates to the unfiltered base path
    pub fn reset_filters(&mut self) {
        self.draft = FilterState::default();
        self.page_size = None;
        self.calendar_open = false;
        self.url.navigate("");
        info!("Reset filters");
    }

    /// Moves the applied query to another page. The draft is left alone.
    pub fn go_to_page(&mut self, page: u32) -> String {
        let mut applied = QueryString::parse(self.url.query());
        applied.page = page;
        self.url.navigate(&applied.encode());
        self.url.href()
    }

    /// Cache key for the results fetch: the committed URL query
    pub fn applied_query(&self) -> &str {
        self.url.query()
    }

    /// Cache key for the preview fetch, derived from the draft
    pub fn preview_query(&self) -> String {
        preview_query_string(&self.draft)
    }
}
