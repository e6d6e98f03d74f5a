//! Typed errors for the catalog engine.
//!
//! Only the collaborator boundary (listing, search, and category sources) and
//! the strict parsers can fail. The pure components (filtering, tag
//! aggregation, comparison, availability) are total and never return these.

use thiserror::Error;

use crate::types::listing::ListingId;

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A listing, search, or category source failed to answer.
    #[error("listing source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// An enumeration-valued criterion did not name a known value.
    ///
    /// The filter pipeline degrades this to an empty-match facet instead of
    /// raising it; only the strict `FromStr` parsers return it.
    #[error("malformed criteria: unknown {field} {value:?}")]
    MalformedCriteria { field: &'static str, value: String },

    /// Listing lookup by id found nothing.
    #[error("listing not found: {id}")]
    ListingNotFound { id: ListingId },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Build a `SourceUnavailable` from any displayable message.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        CatalogError::SourceUnavailable {
            message: message.into(),
        }
    }

    /// True when the failure came from a collaborator rather than the caller.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, CatalogError::SourceUnavailable { .. })
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
