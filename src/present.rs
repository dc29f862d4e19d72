//! Text helpers for listing cards and the detail view.

use crate::models::Listing;
use crate::pagination::{PageLinks, PageMarker};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.svg";
pub const DEFAULT_CURRENCY: &str = "EUR";

/// First property image, else apartment image, else room image, else the placeholder
pub fn main_image(listing: &Listing) -> &str {
    [
        &listing.property_images,
        &listing.apartment_images,
        &listing.room_images,
    ]
    .into_iter()
    .find_map(|images| images.first())
    .map(|image| image.url.as_str())
    .unwrap_or(PLACEHOLDER_IMAGE)
}

/// `"3 months"`, or `fallback` when the listing has no minimum stay
pub fn format_minimum_stay(listing: &Listing, fallback: &str) -> String {
    listing
        .lease_conditions
        .as_ref()
        .and_then(|conditions| conditions.minimum_stay.as_ref())
        .map(|stay| format!("{} {}", stay.amount, stay.unit))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn english_description(listing: &Listing) -> Option<&str> {
    listing
        .room_descriptions
        .iter()
        .find(|d| d.language == "EN")
        .map(|d| d.description.as_str())
}

/// Whole-unit currency amount in en-US style, e.g. `€1,250`. Empty currency means EUR.
pub fn format_currency(amount: f64, currency: Option<&str>) -> String {
    let code = currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);
    let symbol = match code {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    };

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, group_thousands(rounded.abs() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One-line page list, e.g. `‹ 1 … 5 [6] 7 … 12 ›`. Disabled arrows are dropped.
pub fn render_page_links(links: &PageLinks) -> String {
    let mut parts = Vec::with_capacity(links.markers.len() + 2);
    if links.previous.is_some() {
        parts.push("‹".to_string());
    }
    for marker in &links.markers {
        match marker {
            PageMarker::Page(index) if *index == links.current => parts.push(format!("[{}]", marker)),
            _ => parts.push(marker.to_string()),
        }
    }
    if links.next.is_some() {
        parts.push("›".to_string());
    }
    parts.join(" ")
}
