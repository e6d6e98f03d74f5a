//! Listing store access.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{
    criteria::CategoryScope,
    listing::{Listing, ListingId},
};

/// Read access to the listing store.
///
/// Pages are numbered from 1. A successful empty page signals that the source
/// has nothing further for that scope; failures must be reported as errors,
/// never as an empty page.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of listings, optionally scoped to a category.
    async fn get_page(&self, page: u32, scope: &CategoryScope) -> Result<Vec<Listing>>;

    /// Look a listing up by id.
    async fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>>;

    /// All listings in a category, in store iteration order.
    async fn get_by_category(&self, category: &str) -> Result<Vec<Listing>>;
}

#[async_trait]
impl<T: ListingSource + ?Sized> ListingSource for Arc<T> {
    async fn get_page(&self, page: u32, scope: &CategoryScope) -> Result<Vec<Listing>> {
        (**self).get_page(page, scope).await
    }

    async fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        (**self).get_by_id(id).await
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        (**self).get_by_category(category).await
    }
}

#[async_trait]
impl<T: ListingSource + ?Sized> ListingSource for &T {
    async fn get_page(&self, page: u32, scope: &CategoryScope) -> Result<Vec<Listing>> {
        (**self).get_page(page, scope).await
    }

    async fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        (**self).get_by_id(id).await
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        (**self).get_by_category(category).await
    }
}
