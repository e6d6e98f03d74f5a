//! Testing utilities including scripted collaborator implementations.
//!
//! Useful for exercising pagination and comparison logic without a real
//! store, including transport failures that the in-memory store never
//! produces.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, Result};
use crate::traits::{search::SearchSource, source::ListingSource};
use crate::types::{
    criteria::CategoryScope,
    listing::{Listing, ListingId, PricingModel},
};

/// A minimal listing: name "Listing {id}", free pricing, nothing else set.
pub fn listing_fixture(id: &str, category: &str) -> Listing {
    Listing::new(id, format!("Listing {id}"), category, PricingModel::Free)
}

type Scripted = std::result::Result<Vec<Listing>, String>;

/// A listing source whose pages are scripted per page number.
///
/// Each page holds a queue of responses. Calls consume the queue front to
/// back and the last response sticks, so `with_failure(2, ..)` followed by
/// `with_page(2, ..)` fails once and then succeeds. Unscripted pages return
/// an empty success.
#[derive(Default, Clone)]
pub struct ScriptedSource {
    pages: Arc<Mutex<HashMap<u32, VecDeque<Scripted>>>>,
    listings: Arc<Mutex<Vec<Listing>>>,
    search_results: Arc<Mutex<HashMap<String, Scripted>>>,
    page_calls: Arc<Mutex<Vec<(u32, CategoryScope)>>>,
    search_calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful page.
    pub fn with_page(self, page: u32, items: Vec<Listing>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(Ok(items));
        self
    }

    /// Queue a failure for a page.
    pub fn with_failure(self, page: u32, message: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(Err(message.to_string()));
        self
    }

    /// Listings served by `get_by_id` and `get_by_category`.
    pub fn with_listings(self, listings: Vec<Listing>) -> Self {
        *self.listings.lock().unwrap() = listings;
        self
    }

    /// Results for a search query.
    pub fn with_search_results(self, query: &str, results: Vec<Listing>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(results));
        self
    }

    /// Make a search query fail.
    pub fn with_search_failure(self, query: &str, message: &str) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    /// Page numbers requested so far, in call order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    /// Scopes requested so far, in call order.
    pub fn requested_scopes(&self) -> Vec<CategoryScope> {
        self.page_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, s)| s.clone())
            .collect()
    }

    /// Search queries issued so far.
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

fn into_result(scripted: Scripted) -> Result<Vec<Listing>> {
    scripted.map_err(CatalogError::source_unavailable)
}

#[async_trait]
impl ListingSource for ScriptedSource {
    async fn get_page(&self, page: u32, scope: &CategoryScope) -> Result<Vec<Listing>> {
        self.page_calls.lock().unwrap().push((page, scope.clone()));

        let mut pages = self.pages.lock().unwrap();
        let response = match pages.get_mut(&page) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        into_result(response.unwrap_or_else(|| Ok(Vec::new())))
    }

    async fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .find(|l| &l.id == id)
            .cloned())
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.category == category)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchSource for ScriptedSource {
    async fn search(&self, query: &str) -> Result<Vec<Listing>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let scripted = self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()));
        into_result(scripted)
    }
}
