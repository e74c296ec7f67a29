//! Infrastructure layer - catalog loading and repository implementations

pub mod catalog_loader;

pub use catalog_loader::CatalogLoader;
