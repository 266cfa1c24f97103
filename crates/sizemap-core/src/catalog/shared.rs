//! Shared catalog handle with atomic replacement

use super::{LoadOptions, SizeCatalog};
use crate::config::CatalogFile;
use crate::error::Result;
use camino::Utf8Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Cloneable handle to the current catalog.
///
/// Readers take a snapshot and keep using it for as long as they like; a
/// reload swaps the whole catalog, so a snapshot is always either entirely
/// old or entirely new. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<SizeCatalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: SizeCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog as of now
    pub fn snapshot(&self) -> Arc<SizeCatalog> {
        // The slot only ever holds a complete Arc, so a poisoned lock is still consistent.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `catalog` and return the one it replaced
    pub fn replace(&self, catalog: SizeCatalog) -> Arc<SizeCatalog> {
        self.install(Arc::new(catalog))
    }

    fn install(&self, next: Arc<SizeCatalog>) -> Arc<SizeCatalog> {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, next)
    }

    /// Build a new catalog with `load` and install it. Returns the catalog
    /// this call installed, even if another reload has replaced it since.
    ///
    /// On failure the current catalog stays in place and the error is returned.
    pub fn reload<F>(&self, load: F) -> Result<Arc<SizeCatalog>>
    where
        F: FnOnce() -> Result<SizeCatalog>,
    {
        match load() {
            Ok(catalog) => {
                info!(
                    "Reloaded size catalog ({} images, {} variants)",
                    catalog.len(),
                    catalog.variant_count()
                );
                let installed = Arc::new(catalog);
                self.install(Arc::clone(&installed));
                Ok(installed)
            }
            Err(e) => {
                warn!("Catalog reload failed, keeping current catalog: {}", e);
                Err(e)
            }
        }
    }

    /// Reload from a catalog file
    pub fn reload_from_file(
        &self,
        path: &Utf8Path,
        options: &LoadOptions,
    ) -> Result<Arc<SizeCatalog>> {
        self.reload(|| CatalogFile::load_with(path, options).map(CatalogFile::into_catalog))
    }
}
