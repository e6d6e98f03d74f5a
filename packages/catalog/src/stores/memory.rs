//! In-memory listing store for testing, development, and the CLI.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::pipeline::categories::{count_categories, count_subcategories};
use crate::traits::{
    categories::{CategoryCount, CategorySource},
    search::SearchSource,
    source::ListingSource,
};
use crate::types::{
    config::CatalogConfig,
    criteria::CategoryScope,
    listing::{Listing, ListingId},
};

/// In-memory listing store.
///
/// Listings are kept in insertion order, which is the iteration order every
/// query observes. Not suitable for production as data is lost on restart.
pub struct MemoryCatalog {
    listings: RwLock<Vec<Listing>>,
    page_size: usize,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default().page_size)
    }
}

impl MemoryCatalog {
    /// Create an empty store serving pages of `page_size` (floored at 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            listings: RwLock::new(Vec::new()),
            page_size: page_size.max(1),
        }
    }

    /// Create a store pre-loaded with `listings`.
    pub fn with_listings(listings: Vec<Listing>, page_size: usize) -> Self {
        let store = Self::new(page_size);
        *store.listings.write().unwrap() = listings;
        store
    }

    /// Load listings from a JSON array.
    pub fn from_json_str(json: &str, page_size: usize) -> Result<Self> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        Ok(Self::with_listings(listings, page_size))
    }

    /// Add a listing, replacing any existing listing with the same id in place.
    pub fn insert(&self, listing: Listing) {
        let mut listings = self.listings.write().unwrap();
        match listings.iter_mut().find(|l| l.id == listing.id) {
            Some(existing) => *existing = listing,
            None => listings.push(listing),
        }
    }

    pub fn len(&self) -> usize {
        self.listings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Copy of every listing, in store order.
    pub fn snapshot(&self) -> Vec<Listing> {
        self.listings.read().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for MemoryCatalog {
    async fn get_page(&self, page: u32, scope: &CategoryScope) -> Result<Vec<Listing>> {
        if page == 0 {
            return Ok(Vec::new());
        }
        let skip = (page as usize - 1).saturating_mul(self.page_size);
        Ok(self
            .listings
            .read()
            .unwrap()
            .iter()
            .filter(|l| scope.matches(&l.category))
            .skip(skip)
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        Ok(self
            .listings
            .read()
            .unwrap()
            .iter()
            .find(|l| &l.id == id)
            .cloned())
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        Ok(self
            .listings
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.category == category)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchSource for MemoryCatalog {
    /// Case-insensitive substring match over name, description, and tags.
    async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .listings
            .read()
            .unwrap()
            .iter()
            .filter(|l| {
                l.name.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
                    || l.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CategorySource for MemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<CategoryCount>> {
        Ok(count_categories(&self.listings.read().unwrap()))
    }

    async fn list_subcategories(&self, category: &str) -> Result<Vec<CategoryCount>> {
        Ok(count_subcategories(&self.listings.read().unwrap(), category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::listing_fixture;

    fn store() -> MemoryCatalog {
        MemoryCatalog::with_listings(
            vec![
                listing_fixture("1", "Food").with_tags(["vegan"]),
                listing_fixture("2", "Travel").with_description("Rail passes"),
                listing_fixture("3", "Food").with_subcategory("Bakery"),
                listing_fixture("4", "Food"),
                listing_fixture("5", "Travel"),
            ],
            2,
        )
    }

    #[tokio::test]
    async fn test_pages_are_contiguous() {
        let store = store();
        let ids = |v: Vec<Listing>| v.into_iter().map(|l| l.id.to_string()).collect::<Vec<_>>();

        assert_eq!(ids(store.get_page(1, &CategoryScope::All).await.unwrap()), vec!["1", "2"]);
        assert_eq!(ids(store.get_page(3, &CategoryScope::All).await.unwrap()), vec!["5"]);
        assert!(store.get_page(4, &CategoryScope::All).await.unwrap().is_empty());
        assert!(store.get_page(0, &CategoryScope::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scoped_pages() {
        let store = store();
        let scope = CategoryScope::Only("Food".to_string());
        let page2 = store.get_page(2, &scope).await.unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].id.as_str(), "4");
    }

    #[tokio::test]
    async fn test_lookup() {
        let store = store();
        let found = store.get_by_id(&ListingId::new("3")).await.unwrap();
        assert_eq!(found.unwrap().subcategory.as_deref(), Some("Bakery"));
        assert!(store.get_by_id(&ListingId::new("99")).await.unwrap().is_none());
        assert_eq!(store.get_by_category("Travel").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search() {
        let store = store();
        assert_eq!(store.search("VEGAN").await.unwrap().len(), 1);
        assert_eq!(store.search("rail").await.unwrap().len(), 1);
        assert!(store.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories() {
        let store = store();
        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories[0], CategoryCount::new("Food", 3));
        assert_eq!(categories[1], CategoryCount::new("Travel", 2));

        let subs = store.list_subcategories("Food").await.unwrap();
        assert_eq!(subs, vec![CategoryCount::new("Bakery", 1)]);
    }

    #[tokio::test]
    async fn test_shared_store_serves_every_trait() {
        async fn vocabulary(source: impl CategorySource) -> usize {
            source.list_categories().await.unwrap().len()
        }
        async fn hits(source: impl SearchSource, query: &str) -> usize {
            source.search(query).await.unwrap().len()
        }

        let shared = std::sync::Arc::new(store());
        assert_eq!(vocabulary(shared.clone()).await, 2);
        assert_eq!(vocabulary(&*shared).await, 2);
        assert_eq!(hits(shared.clone(), "vegan").await, 1);
        assert_eq!(hits(&*shared, "rail").await, 1);
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let store = MemoryCatalog::default();
        store.insert(listing_fixture("1", "Food"));
        store.insert(listing_fixture("2", "Food"));
        store.insert(listing_fixture("1", "Travel"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].category, "Travel");
    }

    #[test]
    fn test_from_json() {
        let store = MemoryCatalog::from_json_str(
            r#"[{"id": "1", "name": "Loop", "category": "Food", "pricingModel": "Free"}]"#,
            5,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
        assert!(MemoryCatalog::from_json_str("not json", 5).is_err());
    }
}
