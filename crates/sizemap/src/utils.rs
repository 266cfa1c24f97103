//! Utility functions shared across CLI commands

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sizemap_core::{CatalogFile, LoadOptions, Settings, SettingsLoader};

/// Load settings from defaults, ~/.sizemap/config.yaml and SIZEMAP_* variables
pub fn load_settings() -> Result<Settings> {
    let loader = SettingsLoader::new().context("Failed to locate settings directory")?;
    loader.load().context("Failed to load settings")
}

/// Use the given catalog path or search for one from the current directory
pub fn resolve_catalog_path(catalog: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match catalog {
        Some(path) => Ok(path.to_owned()),
        None => CatalogFile::discover().context("No catalog given and none found"),
    }
}

/// Load and schema-check a catalog file
pub fn load_catalog_file(path: &Utf8Path, options: &LoadOptions) -> Result<CatalogFile> {
    CatalogFile::load_with(path, options)
        .with_context(|| format!("Failed to load catalog {}", path))
}

/// Load the catalog selected by `--catalog` (or discovered) using settings
pub fn load_catalog(catalog: Option<&Utf8Path>) -> Result<CatalogFile> {
    let settings = load_settings()?;
    let path = resolve_catalog_path(catalog)?;
    load_catalog_file(&path, &LoadOptions::from(&settings))
}
