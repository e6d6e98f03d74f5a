use anyhow::{Context, Result};
use catalog::CatalogConfig;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub page_size: usize,
    pub max_peers: usize,
    pub top_tags: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            data_path: env::var("CATALOG_DATA").ok().map(PathBuf::from),
            page_size: env::var("CATALOG_PAGE_SIZE")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .context("CATALOG_PAGE_SIZE must be a valid number")?,
            max_peers: env::var("CATALOG_MAX_PEERS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("CATALOG_MAX_PEERS must be a valid number")?,
            top_tags: env::var("CATALOG_TOP_TAGS")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("CATALOG_TOP_TAGS must be a valid number")?,
        })
    }

    /// Engine configuration with the environment overrides applied.
    pub fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::new()
            .with_page_size(self.page_size)
            .with_max_peers(self.max_peers);
        match self.top_tags {
            Some(top) => config.with_top_tags(top),
            None => config,
        }
    }
}
