//! Variant derivation from scale percentages
//!
//! A size map is usually generated from the original resolution of each
//! image and three percentages, one per downscaled tier:
//!
//! ```
//! use sizemap_core::scaling::{derive_variants, parse_scaling};
//! use sizemap_core::types::Dimensions;
//!
//! let scaling = parse_scaling("15 30 60").unwrap();
//! let variants = derive_variants(Dimensions::new(2912, 2047), &scaling);
//! assert_eq!(variants["large"], Dimensions::new(1747, 1228));
//! ```

use crate::catalog::{LoadOptions, SizeCatalog};
use crate::error::{Error, Result};
use crate::types::{Dimensions, SizeMap, VariantMap, LARGE, MEDIUM, ORIGINAL, SMALL};

/// Percentage applied to the original for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Large(u16),
    Medium(u16),
    Small(u16),
}

impl Scale {
    pub fn percent(self) -> u16 {
        match self {
            Self::Large(n) | Self::Medium(n) | Self::Small(n) => n,
        }
    }

    /// Variant name this tier produces
    pub fn variant(self) -> &'static str {
        match self {
            Self::Large(_) => LARGE,
            Self::Medium(_) => MEDIUM,
            Self::Small(_) => SMALL,
        }
    }
}

/// Scales in small, medium, large order
pub type Scaling = [Scale; 3];

/// Parse three percentages separated by spaces and/or commas, assigned to
/// small, medium and large in that order (e.g. `"15 30 60"` or `"15, 30, 60"`).
///
/// Each percentage must be within `1..=100`.
pub fn parse_scaling(input: &str) -> Result<Scaling> {
    let mut values = Vec::with_capacity(3);

    for token in input.split([',', ' ']).filter(|t| !t.trim().is_empty()) {
        let value: u16 = token.trim().parse().map_err(|_| {
            Error::invalid_scaling(input, format!("'{}' is not an unsigned integer", token))
        })?;

        if !(1..=100).contains(&value) {
            return Err(Error::invalid_scaling(
                input,
                format!("{} is outside 1..=100", value),
            ));
        }

        values.push(value);
    }

    let &[small, medium, large] = &values[..] else {
        return Err(Error::invalid_scaling(
            input,
            format!(
                "expected three percentages separated by spaces or commas, got {}",
                values.len()
            ),
        ));
    };

    Ok([
        Scale::Small(small),
        Scale::Medium(medium),
        Scale::Large(large),
    ])
}

/// Original plus one scaled variant per tier
pub fn derive_variants(original: Dimensions, scaling: &Scaling) -> VariantMap {
    let mut variants = VariantMap::new();
    variants.insert(ORIGINAL.to_string(), original);

    for scale in scaling {
        variants.insert(scale.variant().to_string(), original.scale(scale.percent()));
    }

    variants
}

/// Incrementally assemble a size map, then validate it into a catalog
#[derive(Debug, Clone)]
pub struct SizeMapBuilder {
    scaling: Scaling,
    map: SizeMap,
}

impl SizeMapBuilder {
    pub fn new(scaling: Scaling) -> Self {
        Self {
            scaling,
            map: SizeMap::new(),
        }
    }

    /// Add an image with variants derived from its original resolution.
    /// Replaces any variants already recorded for `image`.
    pub fn image(mut self, image: impl Into<String>, original: Dimensions) -> Self {
        self.map
            .insert(image.into(), derive_variants(original, &self.scaling));
        self
    }

    /// Add or overwrite a single variant
    pub fn variant(
        mut self,
        image: impl Into<String>,
        variant: impl Into<String>,
        dimensions: Dimensions,
    ) -> Self {
        self.map
            .entry(image.into())
            .or_default()
            .insert(variant.into(), dimensions);
        self
    }

    /// Raw map without validation
    pub fn into_size_map(self) -> SizeMap {
        self.map
    }

    pub fn build(self) -> Result<SizeCatalog> {
        SizeCatalog::load(self.map)
    }

    pub fn build_with(self, options: &LoadOptions) -> Result<SizeCatalog> {
        SizeCatalog::load_with(self.map, options)
    }
}
