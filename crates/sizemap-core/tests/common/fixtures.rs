//! Test fixture loading utilities

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sizemap_core::{CatalogFile, SizeCatalog};
use std::fs;
use tempfile::TempDir;

/// Sample file names under `tests/fixtures`
pub const TEST_FIXTURE: &str = "test.json";
pub const HOME_FIXTURE: &str = "home.yaml";

/// Directory holding the sample catalogs
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of one sample catalog
pub fn fixture_path(name: &str) -> Utf8PathBuf {
    fixtures_dir().join(name)
}

/// Load one sample catalog
pub fn load_fixture(name: &str) -> SizeCatalog {
    CatalogFile::load(&fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} should load: {}", name, e))
        .into_catalog()
}

/// Scratch directory for catalog files
pub struct CatalogDir {
    temp_dir: TempDir,
    path: Utf8PathBuf,
}

impl CatalogDir {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("temp path is not UTF-8: {:?}", p))?;
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Write a catalog file and return its path
    pub fn write(&self, name: &str, content: &str) -> Result<Utf8PathBuf> {
        let path = self.path.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path))?;
        Ok(path)
    }

    /// Copy a sample catalog into the directory
    pub fn copy_fixture(&self, name: &str) -> Result<Utf8PathBuf> {
        let target = self.path.join(name);
        fs::copy(fixture_path(name), &target)
            .with_context(|| format!("Failed to copy fixture {}", name))?;
        Ok(target)
    }
}
