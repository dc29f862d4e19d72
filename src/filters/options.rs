use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use super::FilterState;
use crate::models::{format_share_type, share_type_options, Listing, ShareTypeOption};

/// Inclusive integer bounds for a range control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

pub const DEFAULT_RENT_RANGE: Bounds = Bounds { min: 0, max: 5000 };
pub const DEFAULT_BEDROOMS_RANGE: Bounds = Bounds { min: 0, max: 10 };

/// Filter control bounds derived from a preview listing set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DynamicFilterOptions {
    pub cities: Vec<String>,
    pub share_types: Vec<ShareTypeOption>,
    pub rent_range: Bounds,
    pub bedrooms_range: Bounds,
    pub available_count: usize,
}

impl Default for DynamicFilterOptions {
    fn default() -> Self {
        Self {
            cities: Vec::new(),
            share_types: Vec::new(),
            rent_range: DEFAULT_RENT_RANGE,
            bedrooms_range: DEFAULT_BEDROOMS_RANGE,
            available_count: 0,
        }
    }
}

/// Derives the option bounds from a listing set.
///
/// Never fails. Values that are not finite are skipped, and a bound too large for an
/// integer is clamped to the integer range.
pub fn derive_filter_options(listings: &[Listing]) -> DynamicFilterOptions {
    if listings.is_empty() {
        return DynamicFilterOptions::default();
    }

    DynamicFilterOptions {
        cities: extract_cities(listings),
        share_types: extract_share_types(listings),
        rent_range: extract_rent_range(listings),
        bedrooms_range: extract_bedrooms_range(listings),
        available_count: listings.len(),
    }
}

/// Unique non-empty trimmed cities, sorted ascending
pub(crate) fn extract_cities(listings: &[Listing]) -> Vec<String> {
    listings
        .iter()
        .filter_map(|l| l.city.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Unique share types in first-seen order
fn extract_share_types(listings: &[Listing]) -> Vec<ShareTypeOption> {
    let mut options: Vec<ShareTypeOption> = Vec::new();
    for raw in listings.iter().filter_map(|l| l.share_type.as_deref()) {
        let raw = raw.trim();
        if raw.is_empty() || options.iter().any(|o| o.value == raw) {
            continue;
        }
        options.push(ShareTypeOption {
            value: raw.to_string(),
            label: format_share_type(raw),
        });
    }
    options
}

fn extract_rent_range(listings: &[Listing]) -> Bounds {
    let rents = listings
        .iter()
        .filter_map(|l| l.rent_net)
        .filter(|r| r.is_finite());

    match min_max(rents) {
        Some((min, max)) => Bounds {
            min: to_bound("rentNet", min.floor()),
            max: to_bound("rentNet", max.ceil()),
        },
        None => DEFAULT_RENT_RANGE,
    }
}

fn extract_bedrooms_range(listings: &[Listing]) -> Bounds {
    let counts = listings
        .iter()
        .filter_map(|l| l.apartment_bedroom_count)
        .filter(|c| c.is_finite() && *c >= 0.0 && c.fract() == 0.0);

    match min_max(counts) {
        Some((min, max)) => Bounds {
            min: to_bound("apartmentBedroomCount", min),
            max: to_bound("apartmentBedroomCount", max),
        },
        None => DEFAULT_BEDROOMS_RANGE,
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn to_bound(field: &'static str, value: f64) -> i64 {
    // 2^63: the first f64 above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !(-LIMIT..LIMIT).contains(&value) {
        warn!("Clamping {} value {} to the integer range", field, value);
    }
    // float-to-int `as` saturates
    value as i64
}

/// Share-type options to show in the filter control.
///
/// With nothing but share types constraining the draft, every share type is offered.
/// Otherwise the dynamically available ones are offered, plus any already-selected type
/// that dropped out of the preview set.
pub fn visible_share_types(
    draft: &FilterState,
    dynamic: &[ShareTypeOption],
) -> Vec<ShareTypeOption> {
    if !draft.has_non_share_type_filters() {
        return share_type_options();
    }

    let mut options = dynamic.to_vec();
    for selected in &draft.selected_share_types {
        if !options.iter().any(|o| o.value == selected.as_str()) {
            options.push(ShareTypeOption::from(*selected));
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShareType;

    fn listing(city: &str, share_type: &str, rent: f64, bedrooms: f64) -> Listing {
        Listing {
            city: Some(city.to_string()),
            share_type: Some(share_type.to_string()),
            rent_net: Some(rent),
            apartment_bedroom_count: Some(bedrooms),
            ..Listing::default()
        }
    }

    #[test]
    fn rent_range_floors_min_and_ceils_max() {
        let listings = vec![
            listing("Berlin", "Studio", 450.2, 1.0),
            listing("Berlin", "Studio", 900.0, 2.0),
            listing("Berlin", "Studio", 1200.7, 3.0),
        ];
        let options = derive_filter_options(&listings);
        assert_eq!(options.rent_range, Bounds { min: 450, max: 1201 });
        assert_eq!(options.bedrooms_range, Bounds { min: 1, max: 3 });
    }

    #[test]
    fn empty_set_yields_documented_defaults() {
        let options = derive_filter_options(&[]);
        assert_eq!(options, DynamicFilterOptions::default());
        assert_eq!(options.rent_range, Bounds { min: 0, max: 5000 });
        assert_eq!(options.bedrooms_range, Bounds { min: 0, max: 10 });
        assert_eq!(options.available_count, 0);
        assert!(options.cities.is_empty());
    }

    #[test]
    fn cities_are_trimmed_unique_and_sorted() {
        let listings = vec![
            listing(" Munich ", "Studio", 800.0, 1.0),
            listing("Berlin", "Studio", 800.0, 1.0),
            listing("Munich", "Studio", 800.0, 1.0),
            listing("   ", "Studio", 800.0, 1.0),
        ];
        let options = derive_filter_options(&listings);
        assert_eq!(options.cities, vec!["Berlin", "Munich"]);
        assert_eq!(options.available_count, 4);
    }

    #[test]
    fn share_types_keep_unknown_values_raw() {
        let listings = vec![
            listing("Berlin", "PrivateRoom", 600.0, 2.0),
            listing("Berlin", "Loft", 600.0, 2.0),
            listing("Berlin", "PrivateRoom", 600.0, 2.0),
        ];
        let options = derive_filter_options(&listings);
        assert_eq!(
            options.share_types,
            vec![
                ShareTypeOption { value: "PrivateRoom".into(), label: "Private Room".into() },
                ShareTypeOption { value: "Loft".into(), label: "Loft".into() },
            ]
        );
    }

    #[test]
    fn invalid_values_fall_back_per_range() {
        let listings = vec![
            Listing {
                rent_net: Some(f64::NAN),
                apartment_bedroom_count: Some(-1.0),
                ..Listing::default()
            },
            Listing {
                rent_net: None,
                apartment_bedroom_count: Some(1.5),
                ..Listing::default()
            },
        ];
        let options = derive_filter_options(&listings);
        assert_eq!(options.rent_range, DEFAULT_RENT_RANGE);
        assert_eq!(options.bedrooms_range, DEFAULT_BEDROOMS_RANGE);
        assert_eq!(options.available_count, 2);
    }

    #[test]
    fn huge_rent_is_clamped_without_losing_other_options() {
        let listings = vec![
            listing("Berlin", "Studio", 1.0e300, 1.0),
            listing("Munich", "PrivateRoom", 700.0, 2.0),
        ];
        let options = derive_filter_options(&listings);
        assert_eq!(options.rent_range, Bounds { min: 700, max: i64::MAX });
        assert_eq!(options.bedrooms_range, Bounds { min: 1, max: 2 });
        assert_eq!(options.cities, vec!["Berlin", "Munich"]);
        assert_eq!(options.share_types.len(), 2);
        assert_eq!(options.available_count, 2);
    }

    #[test]
    fn all_share_types_shown_without_other_filters() {
        let draft = FilterState {
            selected_share_types: vec![ShareType::Studio],
            ..FilterState::default()
        };
        let dynamic = vec![ShareTypeOption::from(ShareType::Studio)];
        assert_eq!(visible_share_types(&draft, &dynamic).len(), 4);
    }

    #[test]
    fn selected_share_type_survives_dropping_out_of_preview() {
        let draft = FilterState {
            city: Some("Berlin".to_string()),
            selected_share_types: vec![ShareType::SharedRoom],
            ..FilterState::default()
        };
        let dynamic = vec![ShareTypeOption::from(ShareType::Studio)];

        let visible = visible_share_types(&draft, &dynamic);
        let values: Vec<_> = visible.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Studio", "SharedRoom"]);
        assert_eq!(visible[1].label, "Shared Room");
    }
}
