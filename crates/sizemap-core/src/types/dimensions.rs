//! Size map data model
//!
//! A size map is a two-level keyed structure:
//!
//! ```text
//! { [image]: { [variant]: { width, height } } }
//! ```
//!
//! Variant names are open string keys. The four conventional names used by
//! the size-map generator are exported as constants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key naming a logical image asset
pub type ImageId = String;

/// Key naming a size class of an image
pub type VariantName = String;

/// Variants of one image
pub type VariantMap = BTreeMap<VariantName, Dimensions>;

/// Raw size map as read from a catalog file
pub type SizeMap = BTreeMap<ImageId, VariantMap>;

/// Full-resolution variant
pub const ORIGINAL: &str = "original";

/// Largest downscaled variant
pub const LARGE: &str = "large";

/// Middle downscaled variant
pub const MEDIUM: &str = "medium";

/// Smallest downscaled variant
pub const SMALL: &str = "small";

/// Conventional variant names, largest first
pub const STANDARD_VARIANTS: [&str; 4] = [ORIGINAL, LARGE, MEDIUM, SMALL];

/// Pixel dimensions of one rendered variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides are non-zero
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Neither side is larger than the corresponding side of `outer`
    pub fn fits_within(&self, outer: &Dimensions) -> bool {
        self.width <= outer.width && self.height <= outer.height
    }

    /// Scale both sides by `percent`, rounding down.
    ///
    /// Sides never drop below one pixel, so a scaled positive value stays
    /// positive.
    pub fn scale(self, percent: u16) -> Self {
        let scale_side = |side: u32| {
            let scaled = u64::from(side) * u64::from(percent) / 100;
            // percent is at most u16::MAX, so the result may exceed u32 for huge inputs
            u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
        };

        Self {
            width: scale_side(self.width),
            height: scale_side(self.height),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}
