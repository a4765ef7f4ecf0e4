//! Declarative styling table.
//!
//! One ordered list of flag -> tag pairs and one holiday label -> tag map
//! drive the resolver. The built-in defaults match the 2014 dataset; a map
//! configuration file can replace either list for other schema revisions.

use std::collections::BTreeMap;

use crash_map_crash_models::ContributingFactor;
use serde::{Deserialize, Serialize};

/// A contributing-factor flag and the class tag it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorTag {
    /// The flag to test.
    pub flag: ContributingFactor,
    /// Class tag appended when the flag is set.
    pub tag: String,
}

impl FactorTag {
    /// Pairs a flag with its own dataset key as the tag.
    #[must_use]
    pub fn own(flag: ContributingFactor) -> Self {
        Self {
            flag,
            tag: flag.to_string(),
        }
    }
}

/// Everything the style resolver needs besides the feature itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRules {
    /// Marker radius in pixels.
    pub radius: f64,
    /// Marker fill opacity.
    pub fill_opacity: f64,
    /// Whether the marker outline is drawn.
    pub stroke: bool,
    /// Flags in the order their tags are appended.
    pub flags: Vec<FactorTag>,
    /// Exact holiday-period label -> class tag.
    pub holidays: BTreeMap<String, String>,
}

impl Default for StyleRules {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill_opacity: 0.9,
            stroke: false,
            flags: ContributingFactor::all()
                .iter()
                .copied()
                .map(FactorTag::own)
                .collect(),
            holidays: default_holidays(),
        }
    }
}

/// Holiday periods of the 2013-14 dataset.
#[must_use]
pub fn default_holidays() -> BTreeMap<String, String> {
    [
        ("Easter Holiday 2014", "Easter2014"),
        ("Queen's Birthday 2014", "QB2014"),
        ("Christmas/New Year 2013-14", "XmasNY2014"),
    ]
    .into_iter()
    .map(|(label, tag)| (label.to_string(), tag.to_string()))
    .collect()
}
