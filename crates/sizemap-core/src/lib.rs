//! # sizemap-core
//!
//! Core library for sizemap providing:
//! - Image size catalogs: validated lookup from image to variant dimensions
//! - Catalog file loading (JSON/YAML) with JSON Schema validation
//! - Named catalog sets and merge policies
//! - Variant derivation from scale percentages
//! - Hierarchical settings and a hot-swappable shared catalog
//!
//! ```
//! use sizemap_core::{Dimensions, SizeCatalog, SizeMap};
//!
//! let map: SizeMap = serde_json::from_str(
//!     r#"{ "god": { "large": { "width": 1747, "height": 1228 } } }"#,
//! ).unwrap();
//! let catalog = SizeCatalog::load(map).unwrap();
//! assert_eq!(catalog.get_variant("god", "large").unwrap(), Dimensions::new(1747, 1228));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod scaling;
pub mod schema;
pub mod types;
pub mod utils;

pub use catalog::{BoundsViolation, CatalogSet, LoadOptions, SharedCatalog, SizeCatalog};
pub use config::{CatalogFile, CatalogFormat, SettingsLoader};
pub use error::{Error, Result};
pub use scaling::{derive_variants, parse_scaling, Scale, Scaling, SizeMapBuilder};
pub use schema::SchemaValidator;
pub use types::{Dimensions, MergePolicy, Settings, SizeMap, VariantMap};
pub use utils::get_home_dir;
