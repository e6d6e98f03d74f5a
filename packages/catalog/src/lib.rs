//! Catalog Query and Aggregation Engine
//!
//! Turns a raw collection of directory listings into filtered, paginated,
//! ranked, and compared views, independent of how they are rendered or
//! stored.
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog::{CatalogConfig, CatalogEngine, FilterCriteria, MemoryCatalog};
//!
//! let store = MemoryCatalog::from_json_str(&json, 12)?;
//! let listings = store.snapshot();
//! let engine = CatalogEngine::new(store, CatalogConfig::default());
//!
//! // Facets, or a search query that overrides them
//! let criteria = FilterCriteria::new().with_category("Food").with_platform("Android");
//! let view = engine.browse(&listings, &criteria, None).await?;
//!
//! // Tag cloud for what is on screen
//! let cloud = engine.tag_cloud(&view);
//!
//! // Compare a listing with up to three same-category peers
//! let comparison = engine.compare(&"42".into()).await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Listing data model, filter criteria, configuration
//! - [`pipeline`] - Filtering, tag aggregation, comparison, availability, paging
//! - [`traits`] - Collaborator interfaces (listing, search, category sources)
//! - [`stores`] - Storage implementations (MemoryCatalog)
//! - [`testing`] - Scripted sources and fixtures for tests

pub mod error;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{CatalogError, Result};
pub use traits::{
    categories::{CategoryCount, CategorySource},
    search::SearchSource,
    source::ListingSource,
};
pub use types::{
    config::{CatalogConfig, FeaturePresence},
    criteria::{CategoryScope, CompiledCriteria, Facet, FilterCriteria, PriceRange, ALL},
    listing::{DeliveryOption, Feature, FeatureDetail, Listing, ListingId, Platform, PricingModel},
};

// Re-export the engine
pub use pipeline::{
    aggregate, aggregate_top, check, compare, compare_with_source, count_categories,
    count_subcategories, filter, filter_with_search, load_next, rank, select_peers, Availability,
    CatalogEngine, ComparisonResult, ListingFeed, LoaderState, PageLoad, SortOrder, TagCloud,
    TagCount, TagTier, WeightedTag,
};

// Re-export stores
pub use stores::MemoryCatalog;

// Re-export testing utilities
pub use testing::ScriptedSource;
