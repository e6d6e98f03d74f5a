//! Listing data model.
//!
//! A `Listing` is owned by the external store. The engine only ever reads it
//! and derives transient structures from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Opaque, immutable listing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        ListingId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        ListingId::new(s)
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        ListingId(s)
    }
}

/// Lowercase and strip separators so "Open Source", "open-source" and
/// "OpenSource" all parse to the same value.
fn fold_enum_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pricing model of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Subscription,
    #[serde(rename = "Open Source", alias = "OpenSource")]
    OpenSource,
}

impl PricingModel {
    pub const ALL: [PricingModel; 5] = [
        PricingModel::Free,
        PricingModel::Freemium,
        PricingModel::Paid,
        PricingModel::Subscription,
        PricingModel::OpenSource,
    ];
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingModel::Free => write!(f, "Free"),
            PricingModel::Freemium => write!(f, "Freemium"),
            PricingModel::Paid => write!(f, "Paid"),
            PricingModel::Subscription => write!(f, "Subscription"),
            PricingModel::OpenSource => write!(f, "Open Source"),
        }
    }
}

impl FromStr for PricingModel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_enum_name(s);
        PricingModel::ALL
            .into_iter()
            .find(|p| fold_enum_name(&p.to_string()) == folded)
            .ok_or_else(|| CatalogError::MalformedCriteria {
                field: "pricing model",
                value: s.to_string(),
            })
    }
}

/// Delivery platform. Order within a listing is display-significant.
///
/// The well-known platforms get their own variants; any other name a store
/// carries ("Chrome Extension", "Smart TV") is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Web,
    Android,
    Ios,
    Windows,
    MacOs,
    Linux,
    Other(String),
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Web,
        Platform::Android,
        Platform::Ios,
        Platform::Windows,
        Platform::MacOs,
        Platform::Linux,
    ];

    pub fn other(name: impl Into<String>) -> Self {
        Platform::from(name.into())
    }

    /// Same platform, ignoring case and separators in `Other` names.
    pub fn same_as(&self, other: &Platform) -> bool {
        match (self, other) {
            (Platform::Other(a), Platform::Other(b)) => fold_enum_name(a) == fold_enum_name(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Web => write!(f, "Web"),
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        let folded = fold_enum_name(&s);
        if folded == "mac" {
            return Platform::MacOs;
        }
        Platform::ALL
            .into_iter()
            .find(|p| fold_enum_name(&p.to_string()) == folded)
            .unwrap_or_else(|| Platform::Other(s.trim().to_string()))
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Other(name) => name,
            known => known.to_string(),
        }
    }
}

impl FromStr for Platform {
    type Err = CatalogError;

    /// Only a blank name is rejected; unknown names become `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(CatalogError::MalformedCriteria {
                field: "platform",
                value: s.to_string(),
            });
        }
        Ok(Platform::from(s.to_string()))
    }
}

/// How a listing reaches its customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryOption {
    #[serde(rename = "Home Delivery", alias = "HomeDelivery")]
    HomeDelivery,
    #[serde(rename = "Click & Collect", alias = "ClickAndCollect")]
    ClickAndCollect,
    #[serde(rename = "In-Store Only", alias = "InStoreOnly")]
    InStoreOnly,
}

/// Detailed feature record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDetail {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// A listing feature: either a bare name or a detailed record.
///
/// Equality across listings is always by [`Feature::name`]. Nothing outside
/// this type should branch on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feature {
    Named(String),
    Detailed(FeatureDetail),
}

impl Feature {
    pub fn named(name: impl Into<String>) -> Self {
        Feature::Named(name.into())
    }

    pub fn detailed(name: impl Into<String>, available: Option<bool>) -> Self {
        Feature::Detailed(FeatureDetail {
            name: name.into(),
            description: None,
            available,
        })
    }

    /// Comparison key for this feature.
    pub fn name(&self) -> &str {
        match self {
            Feature::Named(name) => name,
            Feature::Detailed(detail) => &detail.name,
        }
    }

    /// Explicit availability, if the feature carries one.
    pub fn available(&self) -> Option<bool> {
        match self {
            Feature::Named(_) => None,
            Feature::Detailed(detail) => detail.available,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Feature::Named(_) => None,
            Feature::Detailed(detail) => detail.description.as_deref(),
        }
    }
}

impl From<&str> for Feature {
    fn from(name: &str) -> Self {
        Feature::named(name)
    }
}

/// A catalogued business or brand entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    pub pricing_model: PricingModel,
    /// `None` means availability is unknown, not unavailable everywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_pincodes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_options: Option<Vec<DeliveryOption>>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl Listing {
    /// Create a listing with the required fields; everything else empty.
    pub fn new(
        id: impl Into<ListingId>,
        name: impl Into<String>,
        category: impl Into<String>,
        pricing_model: PricingModel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            subcategory: None,
            tags: Vec::new(),
            platforms: Vec::new(),
            pricing_model,
            available_pincodes: None,
            delivery_options: None,
            features: Vec::new(),
            likes: 0,
            price: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = platforms.into_iter().collect();
        self
    }

    pub fn with_pincodes(mut self, pincodes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.available_pincodes = Some(pincodes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_delivery_options(
        mut self,
        options: impl IntoIterator<Item = DeliveryOption>,
    ) -> Self {
        self.delivery_options = Some(options.into_iter().collect());
        self
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    pub fn with_likes(mut self, likes: u32) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_platform(&self, platform: &Platform) -> bool {
        self.platforms.iter().any(|p| p.same_as(platform))
    }

    /// First `shown` platforms plus how many more were left out.
    pub fn platform_summary(&self, shown: usize) -> (&[Platform], usize) {
        let cut = shown.min(self.platforms.len());
        (&self.platforms[..cut], self.platforms.len() - cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_name_ignores_shape() {
        let bare = Feature::named("Offline mode");
        let detailed = Feature::detailed("Offline mode", Some(false));
        assert_eq!(bare.name(), detailed.name());
        assert_eq!(bare.available(), None);
        assert_eq!(detailed.available(), Some(false));
    }

    #[test]
    fn test_feature_deserializes_both_shapes() {
        let features: Vec<Feature> = serde_json::from_str(
            r#"["Dark mode", {"name": "Sync", "description": "Cloud sync", "available": true}]"#,
        )
        .unwrap();
        assert_eq!(features[0], Feature::named("Dark mode"));
        assert_eq!(features[1].name(), "Sync");
        assert_eq!(features[1].description(), Some("Cloud sync"));
    }

    #[test]
    fn test_pricing_model_parsing_is_lenient_about_spelling() {
        assert_eq!("Open Source".parse::<PricingModel>().unwrap(), PricingModel::OpenSource);
        assert_eq!("open-source".parse::<PricingModel>().unwrap(), PricingModel::OpenSource);
        assert_eq!("freemium".parse::<PricingModel>().unwrap(), PricingModel::Freemium);
        assert!(matches!(
            "Lifetime".parse::<PricingModel>(),
            Err(CatalogError::MalformedCriteria { field: "pricing model", .. })
        ));
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("Mac".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!("web".parse::<Platform>().unwrap(), Platform::Web);
        assert_eq!(
            "Smart Fridge".parse::<Platform>().unwrap(),
            Platform::Other("Smart Fridge".to_string())
        );
        assert!("  ".parse::<Platform>().is_err());
    }

    #[test]
    fn test_unlisted_platform_survives_deserialization() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": "7",
                "name": "Tab Saver",
                "category": "Tools",
                "pricingModel": "Free",
                "platforms": ["Web", "Chrome Extension", "mac"]
            }"#,
        )
        .unwrap();
        assert_eq!(
            listing.platforms,
            vec![Platform::Web, Platform::other("Chrome Extension"), Platform::MacOs]
        );
        assert!(listing.has_platform(&Platform::other("chrome-extension")));
        assert_eq!(listing.platforms[1].to_string(), "Chrome Extension");

        let json = serde_json::to_value(&listing.platforms).unwrap();
        assert_eq!(json, serde_json::json!(["Web", "Chrome Extension", "macOS"]));
    }

    #[test]
    fn test_listing_deserializes_camel_case() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": "42",
                "name": "Loop",
                "category": "Food",
                "pricingModel": "Open Source",
                "platforms": ["Web", "iOS"],
                "availablePincodes": ["560001"],
                "deliveryOptions": ["Home Delivery"],
                "price": "12.50"
            }"#,
        )
        .unwrap();
        assert_eq!(listing.id.as_str(), "42");
        assert_eq!(listing.pricing_model, PricingModel::OpenSource);
        assert_eq!(listing.platforms, vec![Platform::Web, Platform::Ios]);
        assert_eq!(listing.available_pincodes, Some(vec!["560001".to_string()]));
        assert_eq!(listing.delivery_options, Some(vec![DeliveryOption::HomeDelivery]));
        assert_eq!(listing.price, Some(Decimal::new(1250, 2)));
        assert!(listing.tags.is_empty());
        assert_eq!(listing.likes, 0);
    }

    #[test]
    fn test_platform_summary_counts_remainder() {
        let listing = Listing::new("1", "Multi", "Tools", PricingModel::Free).with_platforms([
            Platform::Web,
            Platform::Android,
            Platform::Ios,
            Platform::Windows,
            Platform::Linux,
        ]);
        let (shown, rest) = listing.platform_summary(3);
        assert_eq!(shown, &[Platform::Web, Platform::Android, Platform::Ios]);
        assert_eq!(rest, 2);

        let (shown, rest) = listing.platform_summary(10);
        assert_eq!(shown.len(), 5);
        assert_eq!(rest, 0);
    }
}
