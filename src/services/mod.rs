pub mod catalog_service;
pub mod search;

pub use catalog_service::{CatalogService, DirectoryStore, MemoryStore, ResourceStore};
