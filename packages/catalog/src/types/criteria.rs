//! Filter criteria as they arrive from a caller, and their compiled form.
//!
//! Every field defaults to "no restriction". String-valued facets accept the
//! sentinel [`ALL`] (or an empty string) to disable themselves. Unknown
//! pricing models compile to [`Facet::Unmatchable`] so filtering stays total
//! for malformed input. Platforms are an open vocabulary, so an unlisted
//! platform name compiles to `Only(Platform::Other(..))`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::listing::{Platform, PricingModel};

/// Sentinel value that disables a string facet.
pub const ALL: &str = "All";

fn is_unrestricted(value: &str) -> bool {
    value.is_empty() || value == ALL
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Raw, caller-facing filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub platform: Option<String>,
    pub pricing_model: Option<String>,
    pub price_range: Option<PriceRange>,
    /// Pincode or location code, matched through the availability matcher.
    pub location: Option<String>,
    /// When true, only listings passing the sustainability heuristic remain.
    pub sustainable_only: bool,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria with every sentinel facet explicitly set to [`ALL`].
    pub fn all() -> Self {
        Self {
            category: Some(ALL.to_string()),
            platform: Some(ALL.to_string()),
            pricing_model: Some(ALL.to_string()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_pricing_model(mut self, pricing_model: impl Into<String>) -> Self {
        self.pricing_model = Some(pricing_model.into());
        self
    }

    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn sustainable_only(mut self, on: bool) -> Self {
        self.sustainable_only = on;
        self
    }

    /// Resolve sentinels and parse enumeration facets.
    pub fn compile(&self) -> CompiledCriteria {
        CompiledCriteria {
            category: match self.category.as_deref() {
                None => Facet::Any,
                Some(v) if is_unrestricted(v) => Facet::Any,
                Some(v) => Facet::Only(v.to_string()),
            },
            platform: Facet::parse(self.platform.as_deref(), "platform"),
            pricing_model: Facet::parse(self.pricing_model.as_deref(), "pricing model"),
            price_range: self.price_range,
            location: self
                .location
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            sustainable_only: self.sustainable_only,
        }
    }
}

/// One compiled facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    /// No restriction.
    Any,
    /// Value must match.
    Only(T),
    /// The requested value is unknown; nothing matches.
    Unmatchable(String),
}

impl<T: FromStr> Facet<T> {
    fn parse(raw: Option<&str>, field: &'static str) -> Self {
        match raw {
            None => Facet::Any,
            Some(v) if is_unrestricted(v) => Facet::Any,
            Some(v) => match v.parse::<T>() {
                Ok(parsed) => Facet::Only(parsed),
                Err(_) => {
                    tracing::debug!(field, value = v, "Unknown facet value, matching nothing");
                    Facet::Unmatchable(v.to_string())
                }
            },
        }
    }
}

impl<T> Facet<T> {
    /// Apply the facet to a listing through `matches`.
    pub fn admits(&self, matches: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Facet::Any => true,
            Facet::Only(value) => matches(value),
            Facet::Unmatchable(_) => false,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Facet::Any)
    }
}

/// Criteria ready to be evaluated as independent predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriteria {
    pub category: Facet<String>,
    pub platform: Facet<Platform>,
    pub pricing_model: Facet<PricingModel>,
    pub price_range: Option<PriceRange>,
    pub location: Option<String>,
    pub sustainable_only: bool,
}

impl CompiledCriteria {
    /// True when no facet restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_any()
            && self.platform.is_any()
            && self.pricing_model.is_any()
            && self.price_range.is_none()
            && self.location.is_none()
            && !self.sustainable_only
    }
}

/// Category scope for paginated fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryScope {
    #[default]
    All,
    Only(String),
}

impl CategoryScope {
    /// Interpret an optional category filter; [`ALL`] and empty mean unscoped.
    pub fn from_filter(category: Option<&str>) -> Self {
        match category {
            Some(c) if !is_unrestricted(c) => CategoryScope::Only(c.to_string()),
            _ => CategoryScope::All,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Only(c) => c == category,
        }
    }
}
