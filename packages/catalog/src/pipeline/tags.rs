//! Tag aggregation.
//!
//! Counts how many listings carry each tag, then derives a presentation
//! weight and tier relative to the aggregation scope. Recompute after every
//! filter change: weights and tiers depend on the scope's min and max.
//!
//! Tags are compared exactly as stored. "Vegan" and "vegan" are two tags, so
//! differently-cased duplicates undercount each other.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::listing::Listing;

/// Lower bound of the weight scale.
pub const MIN_WEIGHT: f64 = 0.8;
/// Width of the weight scale; weights fall in `[0.8, 1.5]`.
pub const WEIGHT_SPAN: f64 = 0.7;

const PRIMARY_RATIO: f64 = 0.8;
const SECONDARY_RATIO: f64 = 0.5;

/// Number of listings in scope carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Presentation bucket derived from relative frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagTier {
    Primary,
    Secondary,
    Outline,
}

/// A tag count with its derived weight and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTag {
    pub name: String,
    pub count: usize,
    pub weight: f64,
    pub tier: TagTier,
}

/// Sorted tag counts bound to the min and max count of their scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCloud {
    tags: Vec<TagCount>,
    min: usize,
    max: usize,
}

impl TagCloud {
    /// Tags sorted by descending count, ties in first-seen order.
    pub fn tags(&self) -> &[TagCount] {
        &self.tags
    }

    pub fn min_count(&self) -> usize {
        self.min
    }

    pub fn max_count(&self) -> usize {
        self.max
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Keep only the first `n` tags. Min and max stay those of the full
    /// scope, so weights do not shift when the cloud is truncated.
    pub fn top(mut self, n: usize) -> Self {
        self.tags.truncate(n);
        self
    }

    /// Weight for a count within this scope.
    pub fn weight_for(&self, count: usize) -> f64 {
        let spread = self.max.saturating_sub(self.min).max(1) as f64;
        let offset = count.saturating_sub(self.min) as f64;
        MIN_WEIGHT + WEIGHT_SPAN * offset / spread
    }

    /// Tier for a count within this scope.
    pub fn tier_for(&self, count: usize) -> TagTier {
        let count = count as f64;
        let max = self.max as f64;
        if count > PRIMARY_RATIO * max {
            TagTier::Primary
        } else if count > SECONDARY_RATIO * max {
            TagTier::Secondary
        } else {
            TagTier::Outline
        }
    }

    fn count_of(&self, name: &str) -> Option<usize> {
        self.tags.iter().find(|t| t.name == name).map(|t| t.count)
    }

    /// Weight of a tag by name, if it is in the cloud.
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.count_of(name).map(|count| self.weight_for(count))
    }

    /// Tier of a tag by name, if it is in the cloud.
    pub fn tier(&self, name: &str) -> Option<TagTier> {
        self.count_of(name).map(|count| self.tier_for(count))
    }

    /// Tags with weight and tier attached, in cloud order.
    pub fn weighted(&self) -> Vec<WeightedTag> {
        self.tags
            .iter()
            .map(|t| WeightedTag {
                name: t.name.clone(),
                count: t.count,
                weight: self.weight_for(t.count),
                tier: self.tier_for(t.count),
            })
            .collect()
    }
}

/// Count tags across `listings`.
///
/// A tag repeated within one listing counts once for that listing.
pub fn aggregate(listings: &[Listing]) -> TagCloud {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for listing in listings {
        for (i, tag) in listing.tags.iter().enumerate() {
            if listing.tags[..i].contains(tag) {
                continue;
            }
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    // sort_by is stable: equal counts keep first-seen order
    tags.sort_by(|a, b| b.count.cmp(&a.count));

    TagCloud { tags, min, max }
}

/// Aggregate and optionally keep only the top `limit` tags.
pub fn aggregate_top(listings: &[Listing], limit: Option<usize>) -> TagCloud {
    let cloud = aggregate(listings);
    match limit {
        Some(n) => cloud.top(n),
        None => cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::PricingModel;

    fn tagged(id: &str, tags: &[&str]) -> Listing {
        Listing::new(id, id, "Misc", PricingModel::Free).with_tags(tags.iter().copied())
    }

    #[test]
    fn test_counts_and_order() {
        let cloud = aggregate(&[
            tagged("1", &["b", "a"]),
            tagged("2", &["a", "c"]),
            tagged("3", &["a", "c"]),
        ]);
        let names: Vec<_> = cloud.tags().iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(names, vec![("a", 3), ("c", 2), ("b", 1)]);
        assert_eq!(cloud.min_count(), 1);
        assert_eq!(cloud.max_count(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let cloud = aggregate(&[tagged("1", &["zeta", "alpha"]), tagged("2", &["alpha", "zeta"])]);
        let names: Vec<_> = cloud.tags().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_duplicate_tag_in_one_listing_counts_once() {
        let cloud = aggregate(&[tagged("1", &["x", "x"]), tagged("2", &["x"])]);
        assert_eq!(cloud.tags()[0].count, 2);
    }

    #[test]
    fn test_case_sensitive() {
        let cloud = aggregate(&[tagged("1", &["Vegan"]), tagged("2", &["vegan"])]);
        assert_eq!(cloud.len(), 2);
        assert!(cloud.tags().iter().all(|t| t.count == 1));
    }

    #[test]
    fn test_weight_bounds() {
        let cloud = aggregate(&[
            tagged("1", &["a", "b"]),
            tagged("2", &["a"]),
            tagged("3", &["a"]),
        ]);
        assert!((cloud.weight("a").unwrap() - 1.5).abs() < 1e-9);
        assert!((cloud.weight("b").unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(cloud.weight("missing"), None);
    }

    #[test]
    fn test_equal_counts_weigh_minimum() {
        let cloud = aggregate(&[tagged("1", &["a", "b", "c"])]);
        for tag in cloud.tags() {
            assert!((cloud.weight_for(tag.count) - MIN_WEIGHT).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tiers_relative_to_max() {
        // max = 10: >8 primary, >5 secondary
        let cloud = TagCloud {
            tags: vec![],
            min: 1,
            max: 10,
        };
        assert_eq!(cloud.tier_for(10), TagTier::Primary);
        assert_eq!(cloud.tier_for(9), TagTier::Primary);
        assert_eq!(cloud.tier_for(8), TagTier::Secondary);
        assert_eq!(cloud.tier_for(6), TagTier::Secondary);
        assert_eq!(cloud.tier_for(5), TagTier::Outline);
        assert_eq!(cloud.tier_for(1), TagTier::Outline);
    }

    #[test]
    fn test_top_keeps_scope_bounds() {
        let cloud = aggregate_top(
            &[tagged("1", &["a", "b", "c"]), tagged("2", &["a", "b"]), tagged("3", &["a"])],
            Some(1),
        );
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.tags()[0].name, "a");
        assert_eq!(cloud.min_count(), 1);
        assert_eq!(cloud.max_count(), 3);
    }

    #[test]
    fn test_empty_scope() {
        let cloud = aggregate(&[]);
        assert!(cloud.is_empty());
        assert_eq!(cloud.max_count(), 0);
        assert!(cloud.weighted().is_empty());
    }

    #[test]
    fn test_weighted_attaches_tier() {
        let cloud = aggregate(&[tagged("1", &["a", "b"]), tagged("2", &["a"])]);
        let weighted = cloud.weighted();
        assert_eq!(weighted[0].tier, TagTier::Primary);
        assert_eq!(weighted[1].tier, TagTier::Outline);
    }
}
