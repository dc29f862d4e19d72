//! URL query-string form of the filter state.

use chrono::NaiveDate;
use url::form_urlencoded;

use super::FilterState;
use crate::models::ShareType;

pub const CITY: &str = "city";
pub const RENT_FROM: &str = "rentFrom";
pub const RENT_TO: &str = "rentTo";
pub const BEDROOMS_FROM: &str = "bedroomsFrom";
pub const BEDROOMS_TO: &str = "bedroomsTo";
pub const BOOKABLE_ON: &str = "bookableOn";
pub const SHARE_TYPE: &str = "shareType";
pub const PAGE: &str = "page";
pub const PAGE_SIZE: &str = "pageSize";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter state plus pagination cursor, as carried by the URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pub filters: FilterState,
    pub page: u32,
    pub page_size: Option<u32>,
}

impl QueryString {
    /// Reads a URL query (with or without the leading `?`).
    ///
    /// Unknown keys are ignored. Malformed values (non-numeric bounds, unparseable dates,
    /// unknown share types) are dropped as if absent. For single-valued keys the first
    /// occurrence wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = QueryString::default();
        let mut seen_page = false;
        let filters = &mut parsed.filters;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                CITY if filters.city.is_none() => {
                    filters.city = Some(value.to_string()).filter(|v| !v.is_empty());
                }
                RENT_FROM if filters.rent_from.is_none() => filters.rent_from = rent(value),
                RENT_TO if filters.rent_to.is_none() => filters.rent_to = rent(value),
                BEDROOMS_FROM if filters.bedrooms_from.is_none() => {
                    filters.bedrooms_from = bedrooms(value)
                }
                BEDROOMS_TO if filters.bedrooms_to.is_none() => filters.bedrooms_to = bedrooms(value),
                BOOKABLE_ON if filters.move_in_date.is_none() => {
                    filters.move_in_date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
                }
                SHARE_TYPE => {
                    if let Ok(share_type) = value.parse::<ShareType>() {
                        if !filters.selected_share_types.contains(&share_type) {
                            filters.selected_share_types.push(share_type);
                        }
                    }
                }
                PAGE if !seen_page => {
                    seen_page = true;
                    parsed.page = value.parse().unwrap_or(0);
                }
                PAGE_SIZE if parsed.page_size.is_none() => {
                    parsed.page_size = value.parse().ok().filter(|size| *size > 0);
                }
                _ => {}
            }
        }

        parsed
    }

    /// Canonical serialization. Page 0 is left implicit.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        append_filters(&mut serializer, &self.filters, CityMode::Literal);
        if self.page > 0 {
            serializer.append_pair(PAGE, &self.page.to_string());
        }
        if let Some(size) = self.page_size {
            serializer.append_pair(PAGE_SIZE, &size.to_string());
        }
        serializer.finish()
    }
}

/// How the `all` city sentinel is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CityMode {
    /// Written as-is, so the URL reads back to the same draft
    Literal,
    /// Omitted, since it does not constrain a fetch
    Effective,
}

pub(crate) fn append_filters(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    filters: &FilterState,
    city_mode: CityMode,
) {
    let city = match city_mode {
        CityMode::Literal => filters.city.as_deref(),
        CityMode::Effective => filters.effective_city(),
    };
    let pairs = [
        (CITY, city),
        (RENT_FROM, filters.rent_from.as_deref()),
        (RENT_TO, filters.rent_to.as_deref()),
        (BEDROOMS_FROM, filters.bedrooms_from.as_deref()),
        (BEDROOMS_TO, filters.bedrooms_to.as_deref()),
    ];
    for (key, value) in pairs {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            serializer.append_pair(key, value);
        }
    }
    if let Some(date) = filters.move_in_date {
        serializer.append_pair(BOOKABLE_ON, &date.format(DATE_FORMAT).to_string());
    }
    for share_type in &filters.selected_share_types {
        serializer.append_pair(SHARE_TYPE, share_type.as_str());
    }
}

/// A positive, finite amount; anything else reads as absent
pub(crate) fn rent(value: &str) -> Option<String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|_| value.to_string())
}

/// A non-negative whole number of bedrooms
pub(crate) fn bedrooms(value: &str) -> Option<String> {
    value.parse::<u32>().ok().map(|_| value.to_string())
}
