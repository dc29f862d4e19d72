//! Filter state engine: the draft filter values, their URL form, the preview query and
//! the option bounds derived from a preview fetch.

pub mod options;
pub mod params;
pub mod preview;
pub mod store;

pub use options::{derive_filter_options, visible_share_types, Bounds, DynamicFilterOptions};
pub use params::QueryString;
pub use preview::preview_query_string;
pub use store::{FilterStore, MemoryUrl, UrlState};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::ShareType;

/// City value meaning "no city constraint"
pub const ALL_CITIES: &str = "all";

/// Filter values, either the uncommitted draft or the state read back from the URL.
///
/// Every field is independently optional; `None` (or an empty share-type list) means
/// no constraint. Rent and bedroom bounds keep the text they were entered with, and only
/// text the URL can carry is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub city: Option<String>,
    pub rent_from: Option<String>,
    pub rent_to: Option<String>,
    pub selected_share_types: Vec<ShareType>,
    pub bedrooms_from: Option<String>,
    pub bedrooms_to: Option<String>,
    pub move_in_date: Option<NaiveDate>,
}

/// One edit to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    City(Option<String>),
    RentFrom(Option<String>),
    RentTo(Option<String>),
    ShareTypes(Vec<ShareType>),
    BedroomsFrom(Option<String>),
    BedroomsTo(Option<String>),
    MoveInDate(Option<NaiveDate>),
}

impl FilterState {
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::City(v) => self.city = non_empty(v),
            FilterUpdate::RentFrom(v) => self.rent_from = validated(v, params::rent),
            FilterUpdate::RentTo(v) => self.rent_to = validated(v, params::rent),
            FilterUpdate::BedroomsFrom(v) => {
                self.bedrooms_from = validated(v, params::bedrooms)
            }
            FilterUpdate::BedroomsTo(v) => self.bedrooms_to = validated(v, params::bedrooms),
            FilterUpdate::MoveInDate(v) => self.move_in_date = v,
            FilterUpdate::ShareTypes(types) => {
                self.selected_share_types.clear();
                for t in types {
                    if !self.selected_share_types.contains(&t) {
                        self.selected_share_types.push(t);
                    }
                }
            }
        }
    }

    /// Adds the share type if absent, removes it otherwise
    pub fn toggle_share_type(&mut self, share_type: ShareType) {
        if let Some(pos) = self.selected_share_types.iter().position(|t| *t == share_type) {
            self.selected_share_types.remove(pos);
        } else {
            self.selected_share_types.push(share_type);
        }
    }

    /// City constraint, if any. The `all` sentinel counts as no constraint.
    pub fn effective_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| *c != ALL_CITIES)
    }

    /// Number of active filters, for badges. A non-empty share-type selection counts once.
    pub fn active_filter_count(&self) -> usize {
        [
            self.effective_city().is_some(),
            !self.selected_share_types.is_empty(),
            self.rent_from.is_some(),
            self.rent_to.is_some(),
            self.bedrooms_from.is_some(),
            self.bedrooms_to.is_some(),
            self.move_in_date.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether anything other than the share-type selection constrains the draft
    pub fn has_non_share_type_filters(&self) -> bool {
        self.effective_city().is_some()
            || self.rent_from.is_some()
            || self.rent_to.is_some()
            || self.bedrooms_from.is_some()
            || self.bedrooms_to.is_some()
            || self.move_in_date.is_some()
    }

    /// Inverted ranges. These are reported, never rejected.
    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        let mut warnings = Vec::new();
        if let Some((from, to)) = inverted(&self.rent_from, &self.rent_to) {
            warnings.push(RangeWarning::Rent { from, to });
        }
        if let Some((from, to)) = inverted(&self.bedrooms_from, &self.bedrooms_to) {
            warnings.push(RangeWarning::Bedrooms { from, to });
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeWarning {
    Rent { from: f64, to: f64 },
    Bedrooms { from: f64, to: f64 },
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeWarning::Rent { from, to } => {
                write!(f, "minimum rent {from} is above maximum rent {to}")
            }
            RangeWarning::Bedrooms { from, to } => {
                write!(f, "minimum bedrooms {from} is above maximum bedrooms {to}")
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Applies the same rule the URL parser uses, so a committed value always reads back
fn validated(value: Option<String>, rule: fn(&str) -> Option<String>) -> Option<String> {
    let value = non_empty(value)?;
    let accepted = rule(&value);
    if accepted.is_none() {
        debug!("Ignoring invalid filter value {:?}", value);
    }
    accepted
}

fn inverted(from: &Option<String>, to: &Option<String>) -> Option<(f64, f64)> {
    let from = from.as_deref()?.parse::<f64>().ok()?;
    let to = to.as_deref()?.parse::<f64>().ok()?;
    (from > to).then_some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn all_city_does_not_count() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::City(text("all")));
        assert_eq!(filters.active_filter_count(), 0);

        filters.apply(FilterUpdate::City(text("Berlin")));
        assert_eq!(filters.active_filter_count(), 1);
    }

    #[test]
    fn share_types_count_once() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::ShareTypes(vec![
            ShareType::Studio,
            ShareType::PrivateRoom,
            ShareType::SharedRoom,
        ]));
        assert_eq!(filters.active_filter_count(), 1);

        filters.apply(FilterUpdate::RentTo(text("1200")));
        filters.apply(FilterUpdate::MoveInDate(NaiveDate::from_ymd_opt(2025, 3, 1)));
        assert_eq!(filters.active_filter_count(), 3);
    }

    #[test]
    fn blank_text_clears_field() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::RentFrom(text("500")));
        filters.apply(FilterUpdate::RentFrom(text("   ")));
        assert_eq!(filters.rent_from, None);
    }

    #[test]
    fn bounds_the_url_cannot_carry_are_rejected() {
        let mut filters = FilterState::default();
        for input in ["0", "abc", "-5", "1,200", "inf"] {
            filters.apply(FilterUpdate::RentFrom(text(input)));
            assert_eq!(filters.rent_from, None, "rent {input:?}");
        }
        filters.apply(FilterUpdate::RentFrom(text(" 450.5 ")));
        assert_eq!(filters.rent_from.as_deref(), Some("450.5"));

        filters.apply(FilterUpdate::BedroomsTo(text("2.5")));
        assert_eq!(filters.bedrooms_to, None);
        filters.apply(FilterUpdate::BedroomsTo(text("0")));
        assert_eq!(filters.bedrooms_to.as_deref(), Some("0"));
    }

    #[test]
    fn share_type_selection_has_no_duplicates() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::ShareTypes(vec![ShareType::Studio, ShareType::Studio]));
        assert_eq!(filters.selected_share_types, vec![ShareType::Studio]);

        filters.toggle_share_type(ShareType::SharedRoom);
        filters.toggle_share_type(ShareType::Studio);
        assert_eq!(filters.selected_share_types, vec![ShareType::SharedRoom]);
    }

    #[test]
    fn inverted_ranges_are_reported_not_fixed() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::RentFrom(text("1500")));
        filters.apply(FilterUpdate::RentTo(text("900")));
        filters.apply(FilterUpdate::BedroomsFrom(text("1")));
        filters.apply(FilterUpdate::BedroomsTo(text("3")));

        let warnings = filters.range_warnings();
        assert_eq!(warnings, vec![RangeWarning::Rent { from: 1500.0, to: 900.0 }]);
        assert_eq!(filters.rent_from.as_deref(), Some("1500"));
    }
}
