//! `CatalogEngine` ties the pure pipeline stages to a store.
//!
//! The store supplies listings and search results; the engine applies the
//! configured filtering, aggregation, and comparison to them. Nothing is
//! cached between calls.

use crate::error::Result;
use crate::pipeline::{
    availability::{self, Availability},
    compare::{self, ComparisonResult},
    filter,
    loader::ListingFeed,
    tags::{self, TagCloud},
};
use crate::traits::{search::SearchSource, source::ListingSource};
use crate::types::{
    config::CatalogConfig,
    criteria::{CategoryScope, FilterCriteria},
    listing::{Listing, ListingId},
};

/// Catalog query engine over a listing store.
pub struct CatalogEngine<S> {
    source: S,
    config: CatalogConfig,
}

impl<S> CatalogEngine<S> {
    pub fn new(source: S, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Narrow `listings` by facets.
    pub fn filter(&self, listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
        filter::filter(listings, criteria, &self.config)
    }

    /// Tag cloud for `listings`, truncated to `config.top_tags` if set.
    pub fn tag_cloud(&self, listings: &[Listing]) -> TagCloud {
        tags::aggregate_top(listings, self.config.top_tags)
    }

    /// Availability of one listing at a location code.
    pub fn availability(&self, listing: &Listing, location_code: Option<&str>) -> Availability {
        availability::check(listing, location_code)
    }

    /// Compare `primary` against the first peers found in `candidates`.
    pub fn compare_within(&self, primary: &Listing, candidates: &[Listing]) -> ComparisonResult {
        let peers = compare::select_peers(primary, candidates, self.config.max_peers);
        compare::compare(primary, &peers, self.config.feature_presence)
    }
}

impl<S: ListingSource> CatalogEngine<S> {
    /// Compare the listing with `id` against its same-category peers.
    pub async fn compare(&self, id: &ListingId) -> Result<ComparisonResult> {
        compare::compare_with_source(&self.source, id, &self.config).await
    }

    /// A fresh feed over this engine's store.
    pub fn feed(&self, scope: CategoryScope) -> ListingFeed<&S> {
        ListingFeed::new(&self.source, scope)
    }
}

impl<S: SearchSource> CatalogEngine<S> {
    /// Browse `listings` with facets, or with a search query when one is
    /// given. A non-blank query is sent to the search source and its results
    /// take precedence over the facets (see `filter_with_search`).
    pub async fn browse(
        &self,
        listings: &[Listing],
        criteria: &FilterCriteria,
        query: Option<&str>,
    ) -> Result<Vec<Listing>> {
        let search_results = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Some(self.source.search(q).await?),
            None => None,
        };

        Ok(filter::filter_with_search(
            listings,
            criteria,
            search_results.as_deref(),
            &self.config,
        ))
    }
}
