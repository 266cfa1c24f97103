//! Validated image size catalog

use crate::error::{Error, Result};
use crate::types::{Dimensions, MergePolicy, Settings, SizeMap, VariantMap, ORIGINAL};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Options applied when a catalog is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject variants larger than the image's original instead of warning
    pub strict_original_bounds: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            strict_original_bounds: true,
        }
    }
}

impl From<&Settings> for LoadOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            strict_original_bounds: settings.strict_original_bounds,
        }
    }
}

/// A variant whose dimensions exceed the original of the same image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsViolation {
    pub image: String,
    pub variant: String,
    pub dimensions: Dimensions,
    pub original: Dimensions,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}) exceeds original ({})",
            self.image, self.variant, self.dimensions, self.original
        )
    }
}

impl From<BoundsViolation> for Error {
    fn from(v: BoundsViolation) -> Self {
        Error::OriginalExceeded {
            image: v.image,
            variant: v.variant,
            dimensions: v.dimensions,
            original: v.original,
        }
    }
}

/// Read-only lookup table from image identifier to variant dimensions.
///
/// The only way to build one is [`SizeCatalog::load`] (or the helpers built
/// on it), so every instance satisfies the positive-dimension invariant.
/// Instances are never mutated; reload by building a new catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SizeCatalog {
    images: SizeMap,
}

impl SizeCatalog {
    /// Validate `data` and build a catalog from it.
    ///
    /// Fails with [`Error::Validation`] naming the first image/variant with a
    /// zero width or height. Nothing is kept on failure.
    pub fn load(data: SizeMap) -> Result<Self> {
        Self::load_with(data, &LoadOptions::default())
    }

    /// [`SizeCatalog::load`] with explicit options
    pub fn load_with(data: SizeMap, options: &LoadOptions) -> Result<Self> {
        for (image, variants) in &data {
            for (variant, dimensions) in variants {
                if !dimensions.is_positive() {
                    return Err(Error::validation(image, variant, *dimensions));
                }
            }
        }

        let catalog = Self { images: data };

        let violations = catalog.bounds_violations();
        if options.strict_original_bounds {
            if let Some(first) = violations.into_iter().next() {
                return Err(first.into());
            }
        } else {
            for violation in &violations {
                warn!("Variant larger than original: {}", violation);
            }
        }

        debug!(
            "Loaded size catalog with {} images and {} variants",
            catalog.len(),
            catalog.variant_count()
        );

        Ok(catalog)
    }

    /// Look up the dimensions of one variant.
    ///
    /// Unknown images and unknown variants both yield a not-found error
    /// (see [`Error::is_not_found`]).
    pub fn get_variant(&self, image: &str, variant: &str) -> Result<Dimensions> {
        let variants = self
            .images
            .get(image)
            .ok_or_else(|| Error::image_not_found(image))?;

        variants
            .get(variant)
            .copied()
            .ok_or_else(|| Error::variant_not_found(image, variant))
    }

    /// Look up a variant, falling back to the image's original when the
    /// requested variant does not exist
    pub fn get_variant_or_original(&self, image: &str, variant: &str) -> Result<Dimensions> {
        match self.get_variant(image, variant) {
            Err(Error::VariantNotFound { .. }) => {
                debug!(
                    "Variant {}/{} missing, falling back to {}",
                    image, variant, ORIGINAL
                );
                self.get_variant(image, ORIGINAL)
            }
            other => other,
        }
    }

    /// Variant names of an image; empty when the image is unknown
    pub fn list_variants(&self, image: &str) -> BTreeSet<&str> {
        self.images
            .get(image)
            .map(|variants| variants.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All image identifiers
    pub fn list_images(&self) -> BTreeSet<&str> {
        self.images.keys().map(String::as_str).collect()
    }

    /// All variants of one image
    pub fn variants(&self, image: &str) -> Option<&VariantMap> {
        self.images.get(image)
    }

    pub fn contains_image(&self, image: &str) -> bool {
        self.images.contains_key(image)
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of variants across all images
    pub fn variant_count(&self) -> usize {
        self.images.values().map(|v| v.len()).sum()
    }

    /// Iterate images in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantMap)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every variant that is wider or taller than its image's original.
    /// Images without an original are skipped.
    pub fn bounds_violations(&self) -> Vec<BoundsViolation> {
        let mut violations = Vec::new();

        for (image, variants) in &self.images {
            let Some(original) = variants.get(ORIGINAL) else {
                continue;
            };

            for (variant, dimensions) in variants {
                if !dimensions.fits_within(original) {
                    violations.push(BoundsViolation {
                        image: image.clone(),
                        variant: variant.clone(),
                        dimensions: *dimensions,
                        original: *original,
                    });
                }
            }
        }

        violations
    }

    /// Nested-map form of the catalog; loading it again yields an equal catalog
    pub fn to_size_map(&self) -> SizeMap {
        self.images.clone()
    }

    pub fn into_size_map(self) -> SizeMap {
        self.images
    }

    /// Merge catalogs in order into a single catalog.
    ///
    /// Whole image entries are merged, never individual variants, so each
    /// image in the result comes from exactly one input.
    pub fn merge<'a, I>(catalogs: I, policy: MergePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SizeCatalog>,
    {
        let mut images = SizeMap::new();

        for catalog in catalogs {
            for (image, variants) in &catalog.images {
                if images.contains_key(image) {
                    match policy {
                        MergePolicy::RejectConflicts => return Err(Error::duplicate_image(image)),
                        MergePolicy::LastWriteWins => {
                            debug!("Image {} redefined, keeping later entry", image)
                        }
                    }
                }
                images.insert(image.clone(), variants.clone());
            }
        }

        Ok(Self { images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LARGE, MEDIUM, SMALL};

    fn variants(entries: &[(&str, u32, u32)]) -> VariantMap {
        entries
            .iter()
            .map(|(name, w, h)| (name.to_string(), Dimensions::new(*w, *h)))
            .collect()
    }

    fn god_map() -> SizeMap {
        let mut map = SizeMap::new();
        map.insert(
            "god".to_string(),
            variants(&[
                (ORIGINAL, 2912, 2047),
                (LARGE, 1747, 1228),
                (MEDIUM, 873, 614),
                (SMALL, 436, 307),
            ]),
        );
        map
    }

    #[test]
    fn test_get_variant() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        assert_eq!(
            catalog.get_variant("god", LARGE).unwrap(),
            Dimensions::new(1747, 1228)
        );
    }

    #[test]
    fn test_get_variant_unknown_variant() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        let err = catalog.get_variant("god", "nonexistent").unwrap_err();
        assert!(
            matches!(err, Error::VariantNotFound { .. }),
            "Expected VariantNotFound, got: {:?}",
            err
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_variant_unknown_image() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        let err = catalog.get_variant("missing_image", SMALL).unwrap_err();
        assert!(
            matches!(err, Error::ImageNotFound { ref image } if image == "missing_image"),
            "Expected ImageNotFound, got: {:?}",
            err
        );
    }

    #[test]
    fn test_load_rejects_zero_dimension() {
        let mut map = god_map();
        map.get_mut("god")
            .unwrap()
            .insert(MEDIUM.to_string(), Dimensions::new(873, 0));

        let err = SizeCatalog::load(map).unwrap_err();
        match err {
            Error::Validation { image, variant, .. } => {
                assert_eq!(image, "god");
                assert_eq!(variant, MEDIUM);
            }
            other => panic!("Expected Validation, got: {:?}", other),
        }
    }

    #[test]
    fn test_list_variants_unknown_image_is_empty() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        assert!(catalog.list_variants("missing_image").is_empty());
        assert_eq!(catalog.list_variants("god").len(), 4);
    }

    #[test]
    fn test_fallback_to_original() {
        let mut map = SizeMap::new();
        map.insert("hero".to_string(), variants(&[(ORIGINAL, 800, 600)]));
        let catalog = SizeCatalog::load(map).unwrap();

        assert_eq!(
            catalog.get_variant_or_original("hero", SMALL).unwrap(),
            Dimensions::new(800, 600)
        );
        assert!(catalog
            .get_variant_or_original("missing_image", SMALL)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_fallback_without_original_fails() {
        let mut map = SizeMap::new();
        map.insert("thumb".to_string(), variants(&[(SMALL, 64, 64)]));
        let catalog = SizeCatalog::load(map).unwrap();

        let err = catalog.get_variant_or_original("thumb", LARGE).unwrap_err();
        assert!(matches!(err, Error::VariantNotFound { ref variant, .. } if variant == ORIGINAL));
    }

    #[test]
    fn test_bounds_violation_warns_by_default() {
        let mut map = SizeMap::new();
        map.insert(
            "wide".to_string(),
            variants(&[(ORIGINAL, 100, 100), (LARGE, 120, 80)]),
        );
        let catalog = SizeCatalog::load(map).unwrap();

        let violations = catalog.bounds_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].variant, LARGE);
        assert_eq!(violations[0].original, Dimensions::new(100, 100));
    }

    #[test]
    fn test_bounds_violation_rejected_when_strict() {
        let mut map = SizeMap::new();
        map.insert(
            "wide".to_string(),
            variants(&[(ORIGINAL, 100, 100), (LARGE, 120, 80)]),
        );
        let err = SizeCatalog::load_with(map, &LoadOptions::strict()).unwrap_err();
        assert!(
            matches!(err, Error::OriginalExceeded { .. }),
            "Expected OriginalExceeded, got: {:?}",
            err
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_images_without_original_have_no_bounds() {
        let mut map = SizeMap::new();
        map.insert(
            "loose".to_string(),
            variants(&[(LARGE, 10, 10), (SMALL, 5000, 5000)]),
        );
        let catalog = SizeCatalog::load_with(map, &LoadOptions::strict()).unwrap();
        assert!(catalog.bounds_violations().is_empty());
    }

    #[test]
    fn test_round_trip_through_size_map() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        let reloaded = SizeCatalog::load(catalog.to_size_map()).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let catalog = SizeCatalog::load(god_map()).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["god"]["large"]["width"], 1747);
        assert_eq!(json["god"]["small"]["height"], 307);
    }

    #[test]
    fn test_merge_last_write_wins() {
        let first = SizeCatalog::load(god_map()).unwrap();
        let mut map = SizeMap::new();
        map.insert("god".to_string(), variants(&[(ORIGINAL, 10, 10)]));
        let second = SizeCatalog::load(map).unwrap();

        let merged = SizeCatalog::merge([&first, &second], MergePolicy::LastWriteWins).unwrap();
        assert_eq!(merged.list_variants("god").len(), 1);
        assert_eq!(
            merged.get_variant("god", ORIGINAL).unwrap(),
            Dimensions::new(10, 10)
        );
    }

    #[test]
    fn test_merge_reject_conflicts() {
        let first = SizeCatalog::load(god_map()).unwrap();
        let second = SizeCatalog::load(god_map()).unwrap();

        let err = SizeCatalog::merge([&first, &second], MergePolicy::RejectConflicts).unwrap_err();
        assert!(matches!(err, Error::DuplicateImage { ref image } if image == "god"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = SizeCatalog::load(SizeMap::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.list_images().is_empty());
        assert_eq!(catalog.variant_count(), 0);
    }

    #[test]
    fn test_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SizeCatalog>();
    }
}
