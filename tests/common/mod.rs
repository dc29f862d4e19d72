#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use listing_browser::models::{Listing, ListingsPage, Metadata, PaginationView};
use listing_browser::{FetchError, ListingsSource};

/// In-memory listings API that records every query it receives
pub struct FakeSource {
    pages: HashMap<String, ListingsPage>,
    fallback: ListingsPage,
    failures_left: AtomicU32,
    latency: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(fallback: ListingsPage) -> Self {
        Self {
            pages: HashMap::new(),
            fallback,
            failures_left: AtomicU32::new(0),
            latency: Duration::from_millis(20),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, query: &str, page: ListingsPage) -> Self {
        self.pages.insert(query.to_string(), page);
        self
    }

    /// The next `count` requests answer 503
    pub fn failing(self, count: u32) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ListingsSource for FakeSource {
    async fn fetch(&self, query: &str) -> Result<ListingsPage, FetchError> {
        self.calls.lock().unwrap().push(query.to_string());
        tokio::time::sleep(self.latency).await;

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(FetchError::Status(503));
        }

        Ok(self.pages.get(query).unwrap_or(&self.fallback).clone())
    }

    fn source_name(&self) -> &'static str {
        "fake"
    }
}

pub fn listing(reference_id: &str, city: &str, share_type: &str, rent: f64, bedrooms: f64) -> Listing {
    Listing {
        reference_id: reference_id.to_string(),
        property_name: format!("{} residence", city),
        city: Some(city.to_string()),
        share_type: Some(share_type.to_string()),
        rent_net: Some(rent),
        apartment_bedroom_count: Some(bedrooms),
        currency: Some("EUR".to_string()),
        ..Listing::default()
    }
}

pub fn page(data: Vec<Listing>, current_page: u32, total_pages: u32) -> ListingsPage {
    ListingsPage {
        data,
        metadata: Metadata {
            pagination: PaginationView {
                current_page,
                total_pages,
                has_next_page: current_page + 1 < total_pages,
                has_prev_page: current_page > 0,
            },
        },
    }
}

pub fn catalog() -> Vec<Listing> {
    vec![
        listing("BER-1", "Berlin", "Studio", 780.4, 1.0),
        listing("BER-2", "Berlin", "PrivateRoom", 540.0, 3.0),
        listing("MUC-1", "Munich", "PrivateApartment", 1490.9, 2.0),
        listing("HAM-1", "Hamburg", "SharedRoom", 410.0, 4.0),
    ]
}
