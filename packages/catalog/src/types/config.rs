//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How the comparison engine decides whether a participant has a feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturePresence {
    /// Any feature entry with the same name counts, regardless of its
    /// `available` flag.
    #[default]
    ByName,
    /// Same name, and not explicitly marked `available: false`.
    ByNameAndAvailability,
}

/// Configuration for the catalog engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listings per page served by the in-memory store.
    ///
    /// Default: 12.
    pub page_size: usize,

    /// Maximum number of peers drawn for a comparison.
    ///
    /// Default: 3.
    pub max_peers: usize,

    /// Keep only the top N tags after aggregation (None = all).
    pub top_tags: Option<usize>,

    /// Tag substrings (case-insensitive) that mark a listing as sustainable.
    pub sustainability_keywords: Vec<String>,

    /// Whether a listing with unknown availability passes the location facet.
    ///
    /// Default: true (unknown is not unavailable).
    pub unknown_availability_passes: bool,

    /// Apply facets to supplied search results instead of returning them as-is.
    ///
    /// Default: false (search results override facets).
    pub compose_search_with_facets: bool,

    /// Feature presence rule for comparisons.
    pub feature_presence: FeaturePresence,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            max_peers: 3,
            top_tags: None,
            sustainability_keywords: [
                "eco",
                "sustainable",
                "green",
                "organic",
                "recycled",
                "ethical",
                "fair trade",
                "zero waste",
                "vegan",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            unknown_availability_passes: true,
            compose_search_with_facets: false,
            feature_presence: FeaturePresence::ByName,
        }
    }
}

impl CatalogConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (floored at 1).
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the peer cap for comparisons.
    pub fn with_max_peers(mut self, max: usize) -> Self {
        self.max_peers = max;
        self
    }

    /// Truncate tag aggregates to the top N.
    pub fn with_top_tags(mut self, top: usize) -> Self {
        self.top_tags = Some(top);
        self
    }

    /// Replace the sustainability keyword list.
    pub fn with_sustainability_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sustainability_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unknown_availability_passes(mut self, passes: bool) -> Self {
        self.unknown_availability_passes = passes;
        self
    }

    pub fn with_compose_search_with_facets(mut self, compose: bool) -> Self {
        self.compose_search_with_facets = compose;
        self
    }

    pub fn with_feature_presence(mut self, presence: FeaturePresence) -> Self {
        self.feature_presence = presence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.max_peers, 3);
        assert!(config.top_tags.is_none());
        assert!(config.unknown_availability_passes);
        assert!(!config.compose_search_with_facets);
        assert_eq!(config.feature_presence, FeaturePresence::ByName);
    }

    #[test]
    fn test_page_size_floor() {
        assert_eq!(CatalogConfig::new().with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CatalogConfig = serde_json::from_str(r#"{"max_peers": 5}"#).unwrap();
        assert_eq!(config.max_peers, 5);
        assert_eq!(config.page_size, 12);
        assert!(!config.sustainability_keywords.is_empty());
    }
}
