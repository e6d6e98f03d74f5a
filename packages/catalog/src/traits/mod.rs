//! Collaborator interfaces the engine depends on.
//!
//! Storage, search, and category vocabulary live outside the engine. These
//! traits are what a store (the in-memory `MemoryCatalog`, or a database
//! backed one) implements.

pub mod categories;
pub mod search;
pub mod source;
