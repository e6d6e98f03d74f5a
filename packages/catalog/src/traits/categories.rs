//! Facet vocabulary collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;

/// A category or subcategory name with its listing count.
///
/// Counts are informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Supplies category and subcategory vocabulary for the facets.
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryCount>>;

    async fn list_subcategories(&self, category: &str) -> Result<Vec<CategoryCount>>;
}

#[async_trait]
impl<T: CategorySource + ?Sized> CategorySource for Arc<T> {
    async fn list_categories(&self) -> Result<Vec<CategoryCount>> {
        (**self).list_categories().await
    }

    async fn list_subcategories(&self, category: &str) -> Result<Vec<CategoryCount>> {
        (**self).list_subcategories(category).await
    }
}

#[async_trait]
impl<T: CategorySource + ?Sized> CategorySource for &T {
    async fn list_categories(&self) -> Result<Vec<CategoryCount>> {
        (**self).list_categories().await
    }

    async fn list_subcategories(&self, category: &str) -> Result<Vec<CategoryCount>> {
        (**self).list_subcategories(category).await
    }
}
