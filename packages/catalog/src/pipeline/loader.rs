//! Incremental, page-by-page loading.
//!
//! The caller owns the pagination state. Exhaustion is only ever recorded on
//! a successful empty page; a failed fetch leaves the state exactly as it was
//! so the same page can be requested again.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::source::ListingSource;
use crate::types::{criteria::CategoryScope, listing::Listing};

/// Caller-held pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderState {
    /// Last page successfully loaded; starts at 1.
    pub current_page: u32,
    /// Set once an empty page has come back.
    pub exhausted: bool,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self {
            current_page: 1,
            exhausted: false,
        }
    }
}

impl LoaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to page 1, not exhausted. Call on every filter change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of one `load_next` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLoad {
    pub items: Vec<Listing>,
    pub exhausted: bool,
}

/// Request the page after `state.current_page`.
///
/// Once exhausted, returns an empty exhausted load without touching the
/// source until the state is reset.
pub async fn load_next<S: ListingSource + ?Sized>(
    source: &S,
    state: &mut LoaderState,
    scope: &CategoryScope,
) -> Result<PageLoad> {
    if state.exhausted {
        return Ok(PageLoad {
            items: Vec::new(),
            exhausted: true,
        });
    }

    let Some(next) = state.current_page.checked_add(1) else {
        tracing::warn!(page = state.current_page, "No page after the last page number");
        state.exhausted = true;
        return Ok(PageLoad {
            items: Vec::new(),
            exhausted: true,
        });
    };
    tracing::debug!(page = next, ?scope, "Fetching next page");

    let items = match source.get_page(next, scope).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(page = next, error = %e, "Page fetch failed");
            return Err(e);
        }
    };

    if items.is_empty() {
        tracing::info!(page = next, "Listing source exhausted");
        state.exhausted = true;
    } else {
        state.current_page = next;
    }

    Ok(PageLoad {
        exhausted: state.exhausted,
        items,
    })
}

/// Accumulated listings for one browsing session.
///
/// Methods take `&mut self`, so page advances on one feed are serialized.
pub struct ListingFeed<S> {
    source: S,
    scope: CategoryScope,
    state: LoaderState,
    items: Vec<Listing>,
    started: bool,
}

impl<S: ListingSource> ListingFeed<S> {
    /// An empty feed over `source`. Nothing is fetched until the first load.
    pub fn new(source: S, scope: CategoryScope) -> Self {
        Self {
            source,
            scope,
            state: LoaderState::new(),
            items: Vec::new(),
            started: false,
        }
    }

    /// Fetch page 1 into a fresh feed.
    pub async fn load_initial(&mut self) -> Result<&[Listing]> {
        let first = self.source.get_page(1, &self.scope).await?;
        self.state.reset();
        self.state.exhausted = first.is_empty();
        self.items = first;
        self.started = true;
        Ok(&self.items)
    }

    /// Append the next page. Returns what was appended.
    ///
    /// On a feed that has not loaded page 1 yet, this loads page 1.
    pub async fn load_more(&mut self) -> Result<PageLoad> {
        if !self.started {
            let items = self.load_initial().await?.to_vec();
            return Ok(PageLoad {
                items,
                exhausted: self.state.exhausted,
            });
        }

        let load = load_next(&self.source, &mut self.state, &self.scope).await?;
        self.items.extend(load.items.iter().cloned());
        Ok(load)
    }

    /// Drop accumulated items and restart under a new scope.
    pub fn reset(&mut self, scope: CategoryScope) {
        self.scope = scope;
        self.state.reset();
        self.items.clear();
        self.started = false;
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Listing> {
        self.items
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn scope(&self) -> &CategoryScope {
        &self.scope
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{listing_fixture, ScriptedSource};

    fn page(ids: &[&str]) -> Vec<Listing> {
        ids.iter().map(|id| listing_fixture(id, "Food")).collect()
    }

    #[tokio::test]
    async fn test_two_pages_then_exhausted() {
        let source = ScriptedSource::new()
            .with_page(2, page(&["a", "b"]))
            .with_page(3, page(&["c"]))
            .with_page(4, vec![]);
        let mut state = LoaderState::new();
        let mut accumulated = Vec::new();

        let mut flags = Vec::new();
        for _ in 0..3 {
            let load = load_next(&source, &mut state, &CategoryScope::All).await.unwrap();
            flags.push(load.exhausted);
            accumulated.extend(load.items);
        }

        assert_eq!(flags, vec![false, false, true]);
        assert_eq!(accumulated.len(), 3);
        assert_eq!(state.current_page, 3);
        assert_eq!(source.requested_pages(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_exhausted_stops_requesting() {
        let source = ScriptedSource::new().with_page(2, vec![]);
        let mut state = LoaderState::new();

        load_next(&source, &mut state, &CategoryScope::All).await.unwrap();
        let again = load_next(&source, &mut state, &CategoryScope::All).await.unwrap();

        assert!(again.exhausted);
        assert!(again.items.is_empty());
        assert_eq!(source.requested_pages(), vec![2]);
    }

    #[tokio::test]
    async fn test_failure_is_not_exhaustion() {
        let source = ScriptedSource::new()
            .with_failure(2, "connection reset")
            .with_page(2, page(&["a"]));
        let mut state = LoaderState::new();

        let err = load_next(&source, &mut state, &CategoryScope::All)
            .await
            .unwrap_err();
        assert!(err.is_source_failure());
        assert_eq!(state, LoaderState::new());

        // Retry hits the same page
        let load = load_next(&source, &mut state, &CategoryScope::All).await.unwrap();
        assert_eq!(load.items.len(), 1);
        assert_eq!(state.current_page, 2);
        assert_eq!(source.requested_pages(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_scope_is_forwarded() {
        let source = ScriptedSource::new().with_page(2, page(&["a"]));
        let mut state = LoaderState::new();
        let scope = CategoryScope::Only("Food".to_string());

        load_next(&source, &mut state, &scope).await.unwrap();
        assert_eq!(source.requested_scopes(), vec![scope]);
    }

    #[tokio::test]
    async fn test_feed_accumulates_and_resets() {
        let source = ScriptedSource::new()
            .with_page(1, page(&["a", "b"]))
            .with_page(2, page(&["c"]))
            .with_page(3, vec![]);
        let mut feed = ListingFeed::new(source.clone(), CategoryScope::All);

        assert_eq!(feed.load_initial().await.unwrap().len(), 2);
        feed.load_more().await.unwrap();
        let last = feed.load_more().await.unwrap();

        assert!(last.exhausted);
        assert!(feed.is_exhausted());
        assert_eq!(feed.items().len(), 3);

        let travel = CategoryScope::Only("Travel".to_string());
        feed.reset(travel.clone());
        assert!(feed.items().is_empty());
        assert_eq!(feed.state(), LoaderState::new());
        assert_eq!(feed.scope(), &travel);

        // An exhausted feed asks the source again once reset.
        assert_eq!(feed.load_initial().await.unwrap().len(), 2);
        assert!(!feed.is_exhausted());
        assert_eq!(source.requested_pages(), vec![1, 2, 3, 1]);
        assert_eq!(source.requested_scopes().last(), Some(&travel));
    }

    #[tokio::test]
    async fn test_load_more_before_initial_starts_at_page_one() {
        let source = ScriptedSource::new()
            .with_page(1, page(&["a"]))
            .with_page(2, page(&["b"]));
        let mut feed = ListingFeed::new(source.clone(), CategoryScope::All);

        let first = feed.load_more().await.unwrap();
        assert_eq!(first.items.len(), 1);
        assert!(!first.exhausted);
        feed.load_more().await.unwrap();

        let ids: Vec<_> = feed.items().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(source.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_last_page_number_exhausts_without_fetching() {
        let source = ScriptedSource::new();
        let mut state = LoaderState {
            current_page: u32::MAX,
            exhausted: false,
        };

        let load = load_next(&source, &mut state, &CategoryScope::All).await.unwrap();
        assert!(load.exhausted);
        assert!(state.exhausted);
        assert_eq!(state.current_page, u32::MAX);
        assert!(source.requested_pages().is_empty());
    }
}
