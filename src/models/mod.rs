mod share_type;

pub use share_type::{format_share_type, share_type_options, ShareType, ShareTypeOption};

use serde::{Deserialize, Deserializer, Serialize};

/// A single image attached to a property, apartment or room
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub url: String,
}

/// Minimum stay, e.g. `{ amount: 3, unit: "months" }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MinimumStay {
    pub amount: u32,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaseConditions {
    pub minimum_stay: Option<MinimumStay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomDescription {
    pub language: String,
    pub description: String,
}

/// Core rental listing as returned by the listings API.
///
/// Only `city`, `share_type`, `rent_net` and `apartment_bedroom_count` are read by the
/// filter engine. Those four are decoded leniently: a value of the wrong JSON type
/// becomes `None` instead of failing the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub share_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rent_net: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rent_gross: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub deposit: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub apartment_bedroom_count: Option<f64>,
    #[serde(default)]
    pub property_address: Option<String>,
    #[serde(default)]
    pub property_postal_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub property_latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub property_longitude: Option<f64>,
    #[serde(default)]
    pub property_images: Vec<Image>,
    #[serde(default)]
    pub apartment_images: Vec<Image>,
    #[serde(default)]
    pub room_images: Vec<Image>,
    #[serde(default)]
    pub lease_conditions: Option<LeaseConditions>,
    #[serde(default)]
    pub room_descriptions: Vec<RoomDescription>,
}

/// Pagination metadata reported by the listings API. Never recomputed locally.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub pagination: PaginationView,
}

/// Response body of `GET /listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingsPage {
    pub data: Vec<Listing>,
    #[serde(default)]
    pub metadata: Metadata,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}
