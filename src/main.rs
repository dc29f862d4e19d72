use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use listing_browser::filters::visible_share_types;
use listing_browser::models::{format_share_type, ShareType};
use listing_browser::present::{
    english_description, format_currency, format_minimum_stay, main_image, render_page_links,
};
use listing_browser::{
    BrowserConfig, FilterStore, FilterUpdate, HttpListingsSource, ListingsQuery, MemoryUrl,
    ResultsView, UrlState,
};

#[derive(Debug, Parser)]
#[command(name = "listing-browser", version, about = "Browse and filter rental listings")]
struct Cli {
    /// Root of the listings API
    #[arg(long, env = "LISTINGS_API_URL", default_value = "http://localhost:3000/api")]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "LISTINGS_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Extra attempts after a failed fetch
    #[arg(long, default_value_t = 1)]
    retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the listings for a URL query, e.g. "city=Berlin&shareType=Studio"
    List {
        #[arg(default_value = "")]
        query: String,

        /// Jump to this 1-based page
        #[arg(long)]
        page: Option<u32>,
    },
    /// Edit a draft on top of a URL query and show the filter bounds it leads to
    Options {
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        edits: DraftEdits,

        /// Print the URL the draft would be committed to
        #[arg(long)]
        apply: bool,

        /// Clear every filter instead
        #[arg(long, conflicts_with = "apply")]
        reset: bool,
    },
    /// Show a single listing
    Show { reference_id: String },
    /// List every city with listings
    Cities,
}

#[derive(Debug, Args)]
struct DraftEdits {
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    rent_from: Option<String>,
    #[arg(long)]
    rent_to: Option<String>,
    #[arg(long)]
    bedrooms_from: Option<String>,
    #[arg(long)]
    bedrooms_to: Option<String>,
    /// Repeat to select several, e.g. --share-type Studio --share-type PrivateRoom
    #[arg(long = "share-type")]
    share_types: Vec<ShareType>,
    /// Move-in date, YYYY-MM-DD
    #[arg(long)]
    move_in: Option<NaiveDate>,
}

impl DraftEdits {
    fn into_updates(self) -> (Vec<FilterUpdate>, Option<NaiveDate>) {
        let mut updates = Vec::new();
        let text_fields: [(Option<String>, fn(Option<String>) -> FilterUpdate); 5] = [
            (self.city, FilterUpdate::City),
            (self.rent_from, FilterUpdate::RentFrom),
            (self.rent_to, FilterUpdate::RentTo),
            (self.bedrooms_from, FilterUpdate::BedroomsFrom),
            (self.bedrooms_to, FilterUpdate::BedroomsTo),
        ];
        for (value, update) in text_fields {
            if let Some(value) = value {
                updates.push(update(Some(value)));
            }
        }
        if !self.share_types.is_empty() {
            updates.push(FilterUpdate::ShareTypes(self.share_types));
        }
        (updates, self.move_in)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BrowserConfig {
        api_base_url: cli.api_url,
        request_timeout: Duration::from_secs(cli.timeout_secs),
        retries: cli.retries,
        ..BrowserConfig::default()
    };

    let source = HttpListingsSource::with_config(&config)?;
    info!("Using listings API at {}", source.endpoint());
    let listings = ListingsQuery::new(source, &config);

    match cli.command {
        Command::List { query, page } => list(&listings, &config, &query, page).await,
        Command::Options {
            query,
            edits,
            apply,
            reset,
        } => options(&listings, &config, &query, edits, apply, reset).await,
        Command::Show { reference_id } => show(&listings, &reference_id).await,
        Command::Cities => cities(&listings).await,
    }
}

async fn list(
    listings: &ListingsQuery<HttpListingsSource>,
    config: &BrowserConfig,
    query: &str,
    page: Option<u32>,
) -> anyhow::Result<()> {
    let mut store = FilterStore::load(MemoryUrl::new(config.listings_path.as_str(), query));
    if let Some(page) = page {
        store.go_to_page(page.saturating_sub(1));
    }

    let state = listings.results(store.applied_query()).await;
    match state.view() {
        ResultsView::Loading => println!("Loading..."),
        ResultsView::Error(message) => {
            if let Some(err) = &state.error {
                warn!("{}", err);
            }
            anyhow::bail!(message);
        }
        ResultsView::Empty => println!("No listings match these filters."),
        ResultsView::Listings { listings, pages } => {
            println!("{}\n", store.url().href());
            for (i, listing) in listings.iter().enumerate() {
                let share_type = listing.share_type.as_deref().unwrap_or("Unknown");
                println!("{}. {} ({})", i + 1, listing.property_name, listing.reference_id);
                println!(
                    "   {} in {}",
                    format_share_type(share_type),
                    listing.city.as_deref().unwrap_or("-")
                );
                if let Some(rent) = listing.rent_net {
                    println!(
                        "   {} / month",
                        format_currency(rent, listing.currency.as_deref())
                    );
                }
                println!("   Minimum stay: {}", format_minimum_stay(listing, "Not specified"));
                println!("   Image: {}", main_image(listing));
                println!();
            }
            if let Some(pages) = pages {
                println!("{}", render_page_links(&pages));
            }
        }
    }
    Ok(())
}

async fn options(
    listings: &ListingsQuery<HttpListingsSource>,
    config: &BrowserConfig,
    query: &str,
    edits: DraftEdits,
    apply: bool,
    reset: bool,
) -> anyhow::Result<()> {
    let mut store = FilterStore::load(MemoryUrl::new(config.listings_path.as_str(), query));
    let (updates, move_in) = edits.into_updates();
    for update in updates {
        store.set_field(update);
    }
    if move_in.is_some() {
        store.handle_select_date(move_in);
    }
    for warning in store.draft().range_warnings() {
        warn!("{}", warning);
    }

    let options = listings.preview_options(store.draft()).await;
    println!("Preview query: {}", store.preview_query());
    println!("Active filters: {}", store.active_filter_count());
    println!("Matching listings: {}", options.available_count);
    println!("Cities: {}", options.cities.join(", "));
    println!(
        "Rent: {} - {}",
        options.rent_range.min, options.rent_range.max
    );
    println!(
        "Bedrooms: {} - {}",
        options.bedrooms_range.min, options.bedrooms_range.max
    );
    let share_types: Vec<String> = visible_share_types(store.draft(), &options.share_types)
        .into_iter()
        .map(|o| o.label)
        .collect();
    println!("Share types: {}", share_types.join(", "));

    if apply {
        println!("Apply -> {}", store.apply_filters());
    } else if reset {
        store.reset_filters();
        println!("Reset -> {}", store.url().href());
    }
    Ok(())
}

async fn show(
    listings: &ListingsQuery<HttpListingsSource>,
    reference_id: &str,
) -> anyhow::Result<()> {
    let listing = listings
        .find_listing(reference_id)
        .await
        .context("Failed to load listing")?;

    let Some(listing) = listing else {
        println!("Listing {} could not be found.", reference_id);
        return Ok(());
    };

    let city = listing.city.as_deref().unwrap_or("-");
    println!("{} in {}", listing.property_name, city);
    if let Some(share_type) = listing.share_type.as_deref() {
        println!("Type: {}", format_share_type(share_type));
    }
    if let Some(address) = &listing.property_address {
        println!(
            "Address: {}, {} {}",
            address,
            listing.property_postal_code.as_deref().unwrap_or(""),
            city
        );
    }
    let currency = listing.currency.as_deref();
    if let Some(rent) = listing.rent_net {
        println!("Rent: {} / month", format_currency(rent, currency));
    }
    if let Some(deposit) = listing.deposit {
        println!("Deposit: {}", format_currency(deposit, currency));
    }
    println!("Minimum stay: {}", format_minimum_stay(&listing, "Not specified"));
    println!("Image: {}", main_image(&listing));
    if let Some(description) = english_description(&listing) {
        println!("\n{}", description);
    }
    Ok(())
}

async fn cities(listings: &ListingsQuery<HttpListingsSource>) -> anyhow::Result<()> {
    let state = listings.cities().await;
    match state.into_result() {
        Some(Ok(cities)) => {
            for city in cities.iter() {
                println!("{}", city);
            }
            Ok(())
        }
        Some(Err(err)) => Err(err).context("Failed to fetch cities"),
        None => Ok(()),
    }
}
