#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Marker style resolution.
//!
//! Maps one [`CrashFeature`] to the circle-marker options the map renderer
//! draws it with: a fill color picked by severity, fixed size and opacity,
//! and a list of class tags that page filters hide and show by.

pub mod rules;

use crash_map_crash_models::{CrashFeature, Severity};
use serde::{Serialize, Serializer};

pub use rules::{FactorTag, StyleRules};

/// Circle-marker options for one crash.
///
/// Serializes with the option names the map widget expects
/// (`fillOpacity`, `fillColor`, `className`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    /// Marker radius in pixels.
    pub radius: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Whether the outline is drawn.
    pub stroke: bool,
    /// Fill color; `None` leaves the renderer's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,
    /// Class tags, severity first.
    #[serde(rename = "className", serialize_with = "join_tags")]
    pub class_tags: Vec<String>,
}

impl StyleDescriptor {
    /// Class tags joined into a single `class` attribute value.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.class_tags.join(" ")
    }
}

/// Fill color for a severity.
#[must_use]
pub const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Fatal => "#ff1a1a",
        Severity::Severe => "#ff821a",
        Severity::Minor => "#a7ee18",
        Severity::None => "#15CC15",
    }
}

/// Resolves the marker style for `feature`.
///
/// Tags are appended as: the severity code, then one tag per set flag in
/// `rules.flags` order, then the holiday tag when the holiday label matches
/// exactly. Missing or unknown values contribute nothing.
#[must_use]
pub fn resolve(feature: &CrashFeature, rules: &StyleRules) -> StyleDescriptor {
    let mut class_tags = Vec::new();

    if let Some(severity) = feature.severity {
        class_tags.push(severity.code().to_string());
    }

    class_tags.extend(
        rules
            .flags
            .iter()
            .filter(|entry| feature.has_factor(entry.flag))
            .map(|entry| entry.tag.clone()),
    );

    if let Some(tag) = feature
        .holiday
        .as_ref()
        .and_then(|label| rules.holidays.get(label))
    {
        class_tags.push(tag.clone());
    }

    StyleDescriptor {
        radius: rules.radius,
        fill_opacity: rules.fill_opacity,
        stroke: rules.stroke,
        fill_color: feature.severity.map(severity_color),
        class_tags,
    }
}

fn join_tags<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&tags.join(" "))
}
