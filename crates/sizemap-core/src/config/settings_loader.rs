//! Hierarchical settings loader with precedence
//!
//! Loads settings from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.sizemap/config.yaml)
//! 3. Environment variables (SIZEMAP_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::scaling::parse_scaling;
use crate::types::{MergePolicy, Settings};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "settings-defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// User config file contents; every field is optional so a partial file
/// only overrides what it names
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SettingsOverlay {
    merge_policy: Option<MergePolicy>,
    strict_original_bounds: Option<bool>,
    default_scaling: Option<String>,
}

/// Settings hierarchy loader
pub struct SettingsLoader {
    /// Directory holding the user config file
    config_dir: Utf8PathBuf,
}

impl SettingsLoader {
    /// Create a loader for the standard config directory (~/.sizemap)
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()
            .map_err(|e| Error::invalid_settings(format!("{:#}", e)))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_settings("Home directory path is not valid UTF-8"))?;
        Ok(home.join(".sizemap"))
    }

    /// Load settings with hierarchical precedence
    pub fn load(&self) -> Result<Settings> {
        // Start with embedded defaults
        let mut settings = Self::load_embedded_defaults()?;

        let user_config_path = self.config_dir.join(USER_CONFIG_FILE);
        if user_config_path.exists() {
            debug!("Applying settings from {}", user_config_path);
            let overlay = Self::load_overlay(&user_config_path)?;
            settings = Self::merge(settings, overlay);
        }

        settings = Self::apply_env_overrides(settings)?;

        // Fail early rather than when a derive command first needs it
        parse_scaling(&settings.default_scaling)
            .map_err(|e| Error::invalid_settings(format!("default-scaling: {}", e)))?;

        Ok(settings)
    }

    fn load_embedded_defaults() -> Result<Settings> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::invalid_settings(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_settings(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_settings(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    fn load_overlay(path: &Utf8Path) -> Result<SettingsOverlay> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(SettingsOverlay::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_settings(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply an overlay on top of base settings
    fn merge(mut base: Settings, overlay: SettingsOverlay) -> Settings {
        if let Some(policy) = overlay.merge_policy {
            base.merge_policy = policy;
        }
        if let Some(strict) = overlay.strict_original_bounds {
            base.strict_original_bounds = strict;
        }
        if let Some(scaling) = overlay.default_scaling {
            base.default_scaling = scaling;
        }
        base
    }

    fn apply_env_overrides(mut settings: Settings) -> Result<Settings> {
        if let Ok(val) = env::var("SIZEMAP_MERGE_POLICY") {
            settings.merge_policy = val.parse().map_err(|e: String| {
                Error::invalid_settings(format!("SIZEMAP_MERGE_POLICY: {}", e))
            })?;
        }

        if let Ok(val) = env::var("SIZEMAP_STRICT_BOUNDS") {
            settings.strict_original_bounds = val.trim().parse().map_err(|_| {
                Error::invalid_settings("SIZEMAP_STRICT_BOUNDS must be true or false")
            })?;
        }

        if let Ok(val) = env::var("SIZEMAP_DEFAULT_SCALING") {
            settings.default_scaling = val;
        }

        Ok(settings)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_SCALING;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (SettingsLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = SettingsLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        let (loader, _temp) = create_temp_loader();
        let settings = loader.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_scaling, DEFAULT_SCALING);
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let (loader, _temp) = create_temp_loader();
        let content = r#"
merge-policy: reject-conflicts
default-scaling: "20 40 80"
"#;
        fs::write(loader.config_dir().join("config.yaml"), content).unwrap();

        let settings = loader.load().unwrap();
        assert_eq!(settings.merge_policy, MergePolicy::RejectConflicts);
        assert_eq!(settings.default_scaling, "20 40 80");
        assert!(!settings.strict_original_bounds);
    }

    #[test]
    #[serial]
    fn test_unknown_key_in_file_is_rejected() {
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_dir().join("config.yaml"), "merge-polcy: last\n").unwrap();

        let err = loader.load().unwrap_err();
        assert!(
            matches!(err, Error::InvalidSettings { .. }),
            "Expected InvalidSettings, got: {:?}",
            err
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_dir().join("config.yaml"),
            "merge-policy: reject-conflicts\n",
        )
        .unwrap();

        env::set_var("SIZEMAP_MERGE_POLICY", "last-write-wins");
        env::set_var("SIZEMAP_STRICT_BOUNDS", "true");
        env::set_var("SIZEMAP_DEFAULT_SCALING", "10, 20, 30");

        let settings = loader.load();

        // Clean up
        env::remove_var("SIZEMAP_MERGE_POLICY");
        env::remove_var("SIZEMAP_STRICT_BOUNDS");
        env::remove_var("SIZEMAP_DEFAULT_SCALING");

        let settings = settings.unwrap();
        assert_eq!(settings.merge_policy, MergePolicy::LastWriteWins);
        assert!(settings.strict_original_bounds);
        assert_eq!(settings.default_scaling, "10, 20, 30");
    }

    #[test]
    #[serial]
    fn test_invalid_env_value() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("SIZEMAP_STRICT_BOUNDS", "maybe");
        let result = loader.load();
        env::remove_var("SIZEMAP_STRICT_BOUNDS");

        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    #[serial]
    fn test_invalid_default_scaling_rejected() {
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_dir().join("config.yaml"),
            "default-scaling: \"15 30\"\n",
        )
        .unwrap();

        let err = loader.load().unwrap_err();
        assert!(err.to_string().contains("default-scaling"), "got: {}", err);
    }

    #[test]
    fn test_merge_overlay() {
        let overlay = SettingsOverlay {
            strict_original_bounds: Some(true),
            ..Default::default()
        };
        let merged = SettingsLoader::merge(Settings::default(), overlay);
        assert!(merged.strict_original_bounds);
        assert_eq!(merged.merge_policy, MergePolicy::LastWriteWins);
    }
}
