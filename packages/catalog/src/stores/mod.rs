//! Storage implementations for the catalog engine.
//!
//! Available backends:
//! - `MemoryCatalog` - In-memory storage (always available)

pub mod memory;

pub use memory::MemoryCatalog;
