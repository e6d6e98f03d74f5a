//! Category and subcategory cardinality, for facet display.

use indexmap::IndexMap;

use crate::traits::categories::CategoryCount;
use crate::types::listing::Listing;

fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount::new(name, count))
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Listings per category, descending, ties in first-seen order.
pub fn count_categories(listings: &[Listing]) -> Vec<CategoryCount> {
    tally(listings.iter().map(|l| l.category.as_str()))
}

/// Listings per subcategory within `category`. Listings without a
/// subcategory are not counted.
pub fn count_subcategories(listings: &[Listing], category: &str) -> Vec<CategoryCount> {
    tally(
        listings
            .iter()
            .filter(|l| l.category == category)
            .filter_map(|l| l.subcategory.as_deref()),
    )
}
