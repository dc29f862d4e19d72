use url::form_urlencoded;

use super::params::{append_filters, CityMode, PAGE_SIZE};
use super::FilterState;

/// Page size used to pull every matching listing in a single preview request
pub const PREVIEW_PAGE_SIZE: u32 = 1000;

/// Query for the preview fetch that bounds the filter controls.
///
/// Built from the draft without touching the URL. Never carries `page`; bound values
/// are passed through as typed.
pub fn preview_query_string(filters: &FilterState) -> String {
    preview_query_with_page_size(filters, PREVIEW_PAGE_SIZE)
}

pub fn preview_query_with_page_size(filters: &FilterState, page_size: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_filters(&mut serializer, filters, CityMode::Effective);
    serializer.append_pair(PAGE_SIZE, &page_size.to_string());
    serializer.finish()
}
