//! Catalog browsing: sidebar filter criteria, live search, and their
//! composition.

pub mod filter;

pub use filter::{search_matches, CatalogQuery, FilterCriteria, Selection};
