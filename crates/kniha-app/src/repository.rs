//! Repository adapters for persistence layer

use std::path::PathBuf;
use std::sync::Arc;

use kniha_infra::CatalogLoader;
use kniha_store::{PreviewStore, TripStore};
use kniha_types::Result;

use crate::config::Config;

/// Open the file-based trip store
pub fn open_trip_store(config: &Config) -> Result<TripStore> {
    let store_dir = config.store_dir()?;
    TripStore::open(store_dir)
}

/// Open the trip store at a custom directory
pub fn open_trip_store_at(store_dir: PathBuf) -> Result<TripStore> {
    TripStore::open(store_dir)
}

/// Load the master data catalog; a missing file yields an empty catalog
pub fn open_catalog(config: &Config) -> Result<CatalogLoader> {
    let path = config.catalog_path()?;
    if !path.exists() {
        log::warn!("Catalog {} not found, starting with empty master data", path.display());
        return Ok(CatalogLoader::empty());
    }
    CatalogLoader::load_from_file(&path)
}

/// Preview store with the configured expiry
pub fn open_preview_store(config: &Config) -> Arc<PreviewStore> {
    Arc::new(PreviewStore::new(config.preview_ttl()))
}
