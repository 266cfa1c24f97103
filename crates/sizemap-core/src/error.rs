//! Error types for sizemap-core

use thiserror::Error;

use crate::types::Dimensions;

/// Result type alias using sizemap-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for sizemap
#[derive(Error, Debug)]
pub enum Error {
    /// A variant has a zero width or height
    #[error("Invalid dimensions for {image}/{variant}: {dimensions} (width and height must be positive)")]
    Validation {
        image: String,
        variant: String,
        dimensions: Dimensions,
    },

    /// A variant is larger than the original of the same image (strict mode only)
    #[error("Variant {image}/{variant} ({dimensions}) exceeds original ({original})")]
    OriginalExceeded {
        image: String,
        variant: String,
        dimensions: Dimensions,
        original: Dimensions,
    },

    /// Image identifier not present in the catalog
    #[error("Image not found: {image}")]
    ImageNotFound { image: String },

    /// Variant not present for a known image
    #[error("Variant not found: {image}/{variant}")]
    VariantNotFound { image: String, variant: String },

    /// Same image defined by more than one catalog during a conflict-rejecting merge
    #[error("Duplicate image '{image}' while merging catalogs")]
    DuplicateImage { image: String },

    /// Catalog file not found
    #[error("Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// Malformed scale percentages
    #[error("Invalid scaling '{input}': {reason}")]
    InvalidScaling { input: String, reason: String },

    /// Invalid settings value
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Schema validation error
    #[error("Schema validation failed:\n{errors}")]
    SchemaValidation { errors: String },

    /// Schema not found
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error for a non-positive dimension
    pub fn validation(
        image: impl Into<String>,
        variant: impl Into<String>,
        dimensions: Dimensions,
    ) -> Self {
        Self::Validation {
            image: image.into(),
            variant: variant.into(),
            dimensions,
        }
    }

    /// Create an image not found error
    pub fn image_not_found(image: impl Into<String>) -> Self {
        Self::ImageNotFound {
            image: image.into(),
        }
    }

    /// Create a variant not found error
    pub fn variant_not_found(image: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::VariantNotFound {
            image: image.into(),
            variant: variant.into(),
        }
    }

    /// Create a duplicate image error
    pub fn duplicate_image(image: impl Into<String>) -> Self {
        Self::DuplicateImage {
            image: image.into(),
        }
    }

    /// Create a catalog not found error
    pub fn catalog_not_found(path: impl Into<String>) -> Self {
        Self::CatalogNotFound { path: path.into() }
    }

    /// Create an invalid scaling error
    pub fn invalid_scaling(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScaling {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }

    /// Create a schema validation error from a list of errors
    pub fn schema_validation(errors: Vec<String>) -> Self {
        Self::SchemaValidation {
            errors: errors.join("\n"),
        }
    }

    /// Create a schema not found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound { name: name.into() }
    }

    /// Lookup failures a caller can recover from by falling back
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ImageNotFound { .. } | Self::VariantNotFound { .. }
        )
    }

    /// Data rejected at load time; the whole load must be discarded
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::OriginalExceeded { .. } | Self::SchemaValidation { .. }
        )
    }
}
