//! Facet filter pipeline.
//!
//! Each facet is an independent predicate and a listing survives only if it
//! passes all of them, so evaluation order never changes the result. The
//! pipeline is total: malformed criteria narrow to nothing instead of
//! failing.

use crate::pipeline::availability::{self, Availability};
use crate::types::{
    config::CatalogConfig,
    criteria::{CompiledCriteria, FilterCriteria},
    listing::Listing,
};

/// Sustainability heuristic: any tag containing one of the keywords,
/// compared case-insensitively.
pub fn is_sustainable(listing: &Listing, keywords: &[String]) -> bool {
    listing.tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        keywords
            .iter()
            .any(|keyword| tag.contains(&keyword.to_lowercase()))
    })
}

/// Whether a single listing passes every compiled facet.
pub fn matches(listing: &Listing, criteria: &CompiledCriteria, config: &CatalogConfig) -> bool {
    if !criteria.category.admits(|c| listing.category == *c) {
        return false;
    }
    if !criteria.platform.admits(|p| listing.has_platform(p)) {
        return false;
    }
    if !criteria.pricing_model.admits(|p| listing.pricing_model == *p) {
        return false;
    }

    // Listings without a price pass through the price facet.
    if let (Some(range), Some(price)) = (criteria.price_range, listing.price) {
        if !range.contains(price) {
            return false;
        }
    }

    if let Some(location) = criteria.location.as_deref() {
        match availability::check(listing, Some(location)) {
            Availability::Available => {}
            Availability::Unknown if config.unknown_availability_passes => {}
            _ => return false,
        }
    }

    if criteria.sustainable_only && !is_sustainable(listing, &config.sustainability_keywords) {
        return false;
    }

    true
}

/// Narrow `listings` to those matching `criteria`, preserving order.
pub fn filter(listings: &[Listing], criteria: &FilterCriteria, config: &CatalogConfig) -> Vec<Listing> {
    let compiled = criteria.compile();
    if compiled.is_unrestricted() {
        return listings.to_vec();
    }

    let filtered: Vec<Listing> = listings
        .iter()
        .filter(|listing| matches(listing, &compiled, config))
        .cloned()
        .collect();

    tracing::debug!(
        total = listings.len(),
        matched = filtered.len(),
        "Applied facet filters"
    );
    filtered
}

/// Filter with an optional set of search results.
///
/// When `search_results` is supplied it takes precedence: it is returned
/// unmodified and the facets are ignored. With
/// `config.compose_search_with_facets` the facets are applied to the search
/// results instead.
pub fn filter_with_search(
    listings: &[Listing],
    criteria: &FilterCriteria,
    search_results: Option<&[Listing]>,
    config: &CatalogConfig,
) -> Vec<Listing> {
    match search_results {
        Some(results) if config.compose_search_with_facets => filter(results, criteria, config),
        Some(results) => {
            tracing::debug!(
                results = results.len(),
                "Search results supplied, skipping facet filters"
            );
            results.to_vec()
        }
        None => filter(listings, criteria, config),
    }
}
