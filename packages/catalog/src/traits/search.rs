//! Free-text search collaborator.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::listing::Listing;

/// Free-text search over the catalog.
///
/// Results bypass the facet filter pipeline unless the engine is configured
/// to compose them.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Listing>>;
}

#[async_trait]
impl<T: SearchSource + ?Sized> SearchSource for Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        (**self).search(query).await
    }
}

#[async_trait]
impl<T: SearchSource + ?Sized> SearchSource for &T {
    async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        (**self).search(query).await
    }
}
