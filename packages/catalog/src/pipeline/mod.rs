//! The query and aggregation engine.
//!
//! Everything here except the loader is a pure, total function over
//! already-resolved listings and may be called concurrently without
//! coordination. The loader is the only component with caller-held state.

pub mod availability;
pub mod categories;
pub mod compare;
pub mod engine;
pub mod filter;
pub mod loader;
pub mod rank;
pub mod tags;

pub use availability::{check, Availability};
pub use categories::{count_categories, count_subcategories};
pub use compare::{
    compare, compare_with_source, select_peers, ComparisonResult, FeatureRow, Participant,
    PlatformRow, PresenceRow, PricingRow,
};
pub use engine::CatalogEngine;
pub use filter::{filter, filter_with_search, is_sustainable, matches};
pub use loader::{load_next, ListingFeed, LoaderState, PageLoad};
pub use rank::{rank, SortOrder};
pub use tags::{aggregate, aggregate_top, TagCloud, TagCount, TagTier, WeightedTag};
