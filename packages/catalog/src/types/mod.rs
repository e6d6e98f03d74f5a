//! Catalog data types.

pub mod config;
pub mod criteria;
pub mod listing;
