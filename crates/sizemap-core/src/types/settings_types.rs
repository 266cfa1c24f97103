//! Settings types controlling catalog loading and merging

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default scale percentages (small, medium, large)
pub const DEFAULT_SCALING: &str = "15 30 60";

/// Complete sizemap settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// How duplicate images are handled when catalogs are merged
    #[serde(default)]
    pub merge_policy: MergePolicy,

    /// Treat variants larger than their original as load errors
    #[serde(default)]
    pub strict_original_bounds: bool,

    /// Scale percentages used when deriving variants
    #[serde(default = "default_scaling")]
    pub default_scaling: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            strict_original_bounds: false,
            default_scaling: default_scaling(),
        }
    }
}

fn default_scaling() -> String {
    DEFAULT_SCALING.to_string()
}

/// Policy for an image identifier defined by more than one catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// The later catalog's entry replaces the earlier one wholesale
    #[default]
    LastWriteWins,

    /// Any duplicate image fails the merge
    RejectConflicts,
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::LastWriteWins => write!(f, "last-write-wins"),
            MergePolicy::RejectConflicts => write!(f, "reject-conflicts"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-write-wins" | "last" | "overwrite" => Ok(MergePolicy::LastWriteWins),
            "reject-conflicts" | "reject" | "strict" => Ok(MergePolicy::RejectConflicts),
            other => Err(format!(
                "unknown merge policy '{}' (expected last-write-wins or reject-conflicts)",
                other
            )),
        }
    }
}
