//! Image size catalogs
//!
//! - [`SizeCatalog`]: validated, read-only lookup from image to variant dimensions
//! - [`CatalogSet`]: named catalogs, mergeable into one
//! - [`SharedCatalog`]: swappable handle for hot reload

mod catalog_set;
mod shared;
mod size_catalog;

pub use catalog_set::CatalogSet;
pub use shared::SharedCatalog;
pub use size_catalog::{BoundsViolation, LoadOptions, SizeCatalog};
