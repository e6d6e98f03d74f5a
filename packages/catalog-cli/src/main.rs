//! Command-line front end for the catalog engine.
//!
//! Loads a JSON array of listings into an in-memory store and runs engine
//! operations against it. Results are printed as JSON.

mod config;

use anyhow::{Context, Result};
use catalog::{
    rank, CatalogEngine, CategoryScope, CategorySource, FilterCriteria, ListingId, ListingSource,
    MemoryCatalog, SearchSource, SortOrder, TagTier,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Query a directory of listed alternatives")]
struct Cli {
    /// Listings JSON file (overrides CATALOG_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    Store,
    Likes,
    Name,
}

impl From<Sort> for SortOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Store => SortOrder::StoreOrder,
            Sort::Likes => SortOrder::MostLiked,
            Sort::Name => SortOrder::Name,
        }
    }
}

#[derive(clap::Args)]
struct FacetArgs {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    pricing: Option<String>,
    #[arg(long, requires = "max_price")]
    min_price: Option<Decimal>,
    #[arg(long, requires = "min_price")]
    max_price: Option<Decimal>,
    /// Pincode / location code
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    sustainable: bool,
}

impl FacetArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            category: self.category.clone(),
            platform: self.platform.clone(),
            pricing_model: self.pricing.clone(),
            location: self.location.clone(),
            sustainable_only: self.sustainable,
            ..Default::default()
        };
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            criteria = criteria.with_price_range(min, max);
        }
        criteria
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filter listings by facets, or by a search query that overrides them
    Filter {
        #[command(flatten)]
        facets: FacetArgs,
        /// Free-text search; results replace facet filtering
        #[arg(long)]
        query: Option<String>,
        #[arg(long, value_enum, default_value = "store")]
        sort: Sort,
    },

    /// Tag cloud for the (optionally filtered) listings
    Tags {
        #[command(flatten)]
        facets: FacetArgs,
        /// Keep only the top N tags
        #[arg(long)]
        top: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compare a listing with its same-category peers
    Compare { id: String },

    /// Check a listing's availability at a location code
    Check { id: String, code: Option<String> },

    /// Category counts, or subcategory counts within a category
    Categories { category: Option<String> },

    /// Page through listings until exhausted
    Pages {
        #[arg(long)]
        category: Option<String>,
        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Free-text search
    Search { query: String },
}

#[derive(Serialize)]
struct PagesResponse {
    pages_loaded: u32,
    exhausted: bool,
    count: usize,
    ids: Vec<ListingId>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let data_path = cli
        .data
        .or_else(|| config.data_path.clone())
        .context("No listings file: pass --data or set CATALOG_DATA")?;
    let json = std::fs::read_to_string(&data_path)
        .with_context(|| format!("Failed to read {}", data_path.display()))?;
    let store = MemoryCatalog::from_json_str(&json, config.page_size)
        .with_context(|| format!("Failed to parse listings in {}", data_path.display()))?;
    tracing::info!(listings = store.len(), path = %data_path.display(), "Listings loaded");

    let listings = store.snapshot();
    let engine = CatalogEngine::new(store, config.catalog_config());

    match cli.command {
        Commands::Filter { facets, query, sort } => {
            let view = engine
                .browse(&listings, &facets.criteria(), query.as_deref())
                .await?;
            print_json(&rank(view, sort.into()))?;
        }

        Commands::Tags { facets, top, json } => {
            let view = engine.filter(&listings, &facets.criteria());
            let cloud = match top {
                Some(n) => engine.tag_cloud(&view).top(n),
                None => engine.tag_cloud(&view),
            };

            if json {
                print_json(&cloud.weighted())?;
            } else {
                for tag in cloud.weighted() {
                    let label = format!("{:<24} {:>4}  x{:.2}", tag.name, tag.count, tag.weight);
                    let label = match tag.tier {
                        TagTier::Primary => label.bright_green().bold(),
                        TagTier::Secondary => label.cyan(),
                        TagTier::Outline => label.dimmed(),
                    };
                    println!("{}", label);
                }
            }
        }

        Commands::Compare { id } => {
            let result = engine.compare(&ListingId::new(id)).await?;
            if !result.has_peers() {
                tracing::info!("No peers in this category");
            }
            print_json(&result)?;
        }

        Commands::Check { id, code } => {
            let id = ListingId::new(id);
            let listing = engine
                .source()
                .get_by_id(&id)
                .await?
                .with_context(|| format!("Listing not found: {}", id))?;
            print_json(&engine.availability(&listing, code.as_deref()))?;
        }

        Commands::Categories { category } => {
            let counts = match category {
                Some(c) => engine.source().list_subcategories(&c).await?,
                None => engine.source().list_categories().await?,
            };
            print_json(&counts)?;
        }

        Commands::Pages {
            category,
            max_pages,
        } => {
            let mut feed = engine.feed(CategoryScope::from_filter(category.as_deref()));
            feed.load_initial().await?;
            let mut pages_loaded = 1;

            while !feed.is_exhausted() && max_pages.map_or(true, |max| pages_loaded < max) {
                let load = feed.load_more().await?;
                if !load.exhausted {
                    pages_loaded += 1;
                }
            }

            print_json(&PagesResponse {
                pages_loaded,
                exhausted: feed.is_exhausted(),
                count: feed.items().len(),
                ids: feed.items().iter().map(|l| l.id.clone()).collect(),
            })?;
        }

        Commands::Search { query } => {
            print_json(&engine.source().search(&query).await?)?;
        }
    }

    Ok(())
}
