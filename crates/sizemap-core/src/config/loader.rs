//! Catalog file loading and saving

use crate::catalog::{CatalogSet, LoadOptions, SizeCatalog};
use crate::error::{Error, Result};
use crate::schema::SchemaValidator;
use crate::types::SizeMap;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs;
use tracing::debug;

/// Catalog file names to search for
const CATALOG_FILE_NAMES: &[&str] = &["sizemap.json", "sizemap.yaml", "sizemap.yml"];

/// Schema catalog files are validated against
const CATALOG_SCHEMA: &str = "sizemap";

/// On-disk encoding of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from the file extension; anything that is not `.json`
    /// is read as YAML, which also accepts JSON
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }

    fn parse_value(self, content: &str) -> Result<Value> {
        Ok(match self {
            CatalogFormat::Json => serde_json::from_str(content)?,
            CatalogFormat::Yaml => serde_yaml_ng::from_str(content)?,
        })
    }
}

/// A catalog together with the file it was loaded from
#[derive(Debug, Clone)]
pub struct CatalogFile {
    /// The validated catalog
    pub catalog: SizeCatalog,

    /// Path to the catalog file
    pub path: Utf8PathBuf,

    /// Encoding of the file
    pub format: CatalogFormat,
}

impl CatalogFile {
    /// Load a catalog file with default options
    pub fn load(path: &Utf8Path) -> Result<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load a catalog file, checking it against the embedded catalog schema
    /// before deserializing.
    ///
    /// Schema errors list every offending path (e.g. `/god/large/width`),
    /// including negative or non-integer sizes.
    pub fn load_with(path: &Utf8Path, options: &LoadOptions) -> Result<Self> {
        Self::load_and_validate(path, SchemaValidator::global()?, options)
    }

    /// [`CatalogFile::load_with`] using an explicit validator
    pub fn load_and_validate(
        path: &Utf8Path,
        validator: &SchemaValidator,
        options: &LoadOptions,
    ) -> Result<Self> {
        let content = read_catalog(path)?;
        let format = CatalogFormat::from_path(path);

        debug!("Parsing catalog {} as {:?}", path, format);
        let catalog = parse_checked(&content, format, validator, options)?;

        Ok(Self {
            catalog,
            path: path.to_owned(),
            format,
        })
    }

    /// Parse catalog content in the given format, schema check included
    pub fn parse(content: &str, format: CatalogFormat, options: &LoadOptions) -> Result<SizeCatalog> {
        parse_checked(content, format, SchemaValidator::global()?, options)
    }

    /// Find a catalog file in the current directory or its parents
    pub fn discover() -> Result<Utf8PathBuf> {
        let cwd = utf8_path(std::env::current_dir()?)?;
        Self::discover_from(&cwd)
    }

    /// Find a catalog file in `start` or its parents
    pub fn discover_from(start: &Utf8Path) -> Result<Utf8PathBuf> {
        let mut current = start;

        loop {
            for name in CATALOG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    debug!("Discovered catalog file {}", path);
                    return Ok(path);
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::catalog_not_found(
            "sizemap.json (searched current and parent directories)",
        ))
    }

    /// Catalog name: the file stem (`home.json` → `home`)
    pub fn name(&self) -> &str {
        self.path.file_stem().unwrap_or(self.path.as_str())
    }

    pub fn catalog(&self) -> &SizeCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> SizeCatalog {
        self.catalog
    }

    /// Save the catalog back to its own file
    pub fn save(&self) -> Result<()> {
        save_catalog(&self.catalog, &self.path)
    }
}

/// Serialize a catalog to pretty JSON
pub fn to_json(catalog: &SizeCatalog) -> Result<String> {
    serde_json::to_string_pretty(catalog).map_err(Error::from)
}

/// Serialize a catalog to YAML
pub fn to_yaml(catalog: &SizeCatalog) -> Result<String> {
    serde_yaml_ng::to_string(catalog).map_err(Error::from)
}

/// Write a catalog to `path`, choosing the encoding from its extension
pub fn save_catalog(catalog: &SizeCatalog, path: &Utf8Path) -> Result<()> {
    let content = match CatalogFormat::from_path(path) {
        CatalogFormat::Json => to_json(catalog)?,
        CatalogFormat::Yaml => to_yaml(catalog)?,
    };
    fs::write(path, content)?;
    Ok(())
}

fn parse_checked(
    content: &str,
    format: CatalogFormat,
    validator: &SchemaValidator,
    options: &LoadOptions,
) -> Result<SizeCatalog> {
    let value = format.parse_value(content)?;
    validator.validate(&value, CATALOG_SCHEMA)?;

    let map: SizeMap = serde_json::from_value(value)?;
    SizeCatalog::load_with(map, options)
}

/// Non-UTF-8 paths surface as `InvalidData` IO errors
fn utf8_path(path: std::path::PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| Error::Io(e.into_io_error()))
}

fn read_catalog(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::catalog_not_found(path.as_str())
        } else {
            Error::Io(e)
        }
    })
}

fn is_catalog_file(path: &Utf8Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "json" | "yaml" | "yml"))
}

impl CatalogSet {
    /// Load catalog files in the given order, each named by its file stem.
    /// Any invalid file fails the whole set.
    pub fn load_files<P: AsRef<Utf8Path>>(paths: &[P], options: &LoadOptions) -> Result<Self> {
        let mut set = CatalogSet::new();
        for path in paths {
            let file = CatalogFile::load_with(path.as_ref(), options)?;
            let name = file.name().to_string();
            set.insert(name, file.into_catalog());
        }
        Ok(set)
    }

    /// Load every `.json`, `.yaml` and `.yml` file in `dir`, in file name order
    pub fn load_dir(dir: &Utf8Path, options: &LoadOptions) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            if is_catalog_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        debug!("Loading {} catalog files from {}", paths.len(), dir);
        Self::load_files(&paths, options)
    }
}
