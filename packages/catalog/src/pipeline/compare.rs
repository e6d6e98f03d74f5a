//! Comparison of one listing against its same-category peers.
//!
//! Column 0 of every presence row is the primary listing; peers follow in the
//! order they were supplied.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::traits::source::ListingSource;
use crate::types::{
    config::{CatalogConfig, FeaturePresence},
    listing::{Feature, Listing, ListingId, Platform, PricingModel},
};

/// One column of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ListingId,
    pub name: String,
}

/// Presence of one key across all participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRow<K> {
    pub key: K,
    pub presence: Vec<bool>,
}

pub type FeatureRow = PresenceRow<String>;
pub type PlatformRow = PresenceRow<Platform>;

/// Pricing model of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRow {
    pub id: ListingId,
    pub name: String,
    pub pricing_model: PricingModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub participants: Vec<Participant>,
    pub feature_matrix: Vec<FeatureRow>,
    pub pricing_rows: Vec<PricingRow>,
    pub platform_matrix: Vec<PlatformRow>,
}

impl ComparisonResult {
    /// False when peer selection came back empty. Not an error; callers decide
    /// whether a one-column comparison is worth rendering.
    pub fn has_peers(&self) -> bool {
        self.participants.len() > 1
    }

    pub fn peer_count(&self) -> usize {
        self.participants.len().saturating_sub(1)
    }

    /// Feature row by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureRow> {
        self.feature_matrix.iter().find(|r| r.key == name)
    }

    /// Platform row by platform.
    pub fn platform(&self, platform: &Platform) -> Option<&PlatformRow> {
        self.platform_matrix.iter().find(|r| r.key.same_as(platform))
    }
}

/// Same-category listings other than `primary`, first `cap` in iteration
/// order. No similarity ranking.
pub fn select_peers<'a>(
    primary: &Listing,
    candidates: impl IntoIterator<Item = &'a Listing>,
    cap: usize,
) -> Vec<Listing> {
    candidates
        .into_iter()
        .filter(|c| c.category == primary.category && c.id != primary.id)
        .take(cap)
        .cloned()
        .collect()
}

fn has_feature(listing: &Listing, name: &str, rule: FeaturePresence) -> bool {
    listing.features.iter().any(|f: &Feature| {
        f.name() == name
            && match rule {
                FeaturePresence::ByName => true,
                FeaturePresence::ByNameAndAvailability => f.available() != Some(false),
            }
    })
}

/// Build the comparison matrices for `primary` against `peers`.
pub fn compare(primary: &Listing, peers: &[Listing], rule: FeaturePresence) -> ComparisonResult {
    let participants: Vec<&Listing> = std::iter::once(primary).chain(peers.iter()).collect();

    let feature_names: IndexSet<&str> = participants
        .iter()
        .flat_map(|l| l.features.iter().map(Feature::name))
        .collect();

    let feature_matrix = feature_names
        .into_iter()
        .map(|name| PresenceRow {
            key: name.to_string(),
            presence: participants
                .iter()
                .map(|l| has_feature(l, name, rule))
                .collect(),
        })
        .collect();

    let platforms: IndexSet<&Platform> = participants
        .iter()
        .flat_map(|l| l.platforms.iter())
        .collect();

    let platform_matrix = platforms
        .into_iter()
        .map(|platform| PresenceRow {
            key: platform.clone(),
            presence: participants
                .iter()
                .map(|l| l.has_platform(platform))
                .collect(),
        })
        .collect();

    let pricing_rows = participants
        .iter()
        .map(|l| PricingRow {
            id: l.id.clone(),
            name: l.name.clone(),
            pricing_model: l.pricing_model,
        })
        .collect();

    ComparisonResult {
        participants: participants
            .iter()
            .map(|l| Participant {
                id: l.id.clone(),
                name: l.name.clone(),
            })
            .collect(),
        feature_matrix,
        pricing_rows,
        platform_matrix,
    }
}

/// Look `id` up in `source`, pick its peers, and compare.
pub async fn compare_with_source<S: ListingSource + ?Sized>(
    source: &S,
    id: &ListingId,
    config: &CatalogConfig,
) -> Result<ComparisonResult> {
    let primary = source
        .get_by_id(id)
        .await?
        .ok_or_else(|| CatalogError::ListingNotFound { id: id.clone() })?;

    let candidates = source.get_by_category(&primary.category).await?;
    let peers = select_peers(&primary, &candidates, config.max_peers);

    tracing::debug!(
        listing_id = %primary.id,
        category = %primary.category,
        peers = peers.len(),
        "Comparing listing against peers"
    );

    Ok(compare(&primary, &peers, config.feature_presence))
}
