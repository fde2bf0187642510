// src/domain/catalog/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{CatalogEntry, CatalogEntryUpdate, CatalogKind, NewCatalogEntry};
pub use repository::CatalogRepository;
