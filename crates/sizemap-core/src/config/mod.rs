//! Catalog file loading and settings management

mod loader;
mod settings_loader;

pub use loader::{save_catalog, to_json, to_yaml, CatalogFile, CatalogFormat};
pub use settings_loader::SettingsLoader;
