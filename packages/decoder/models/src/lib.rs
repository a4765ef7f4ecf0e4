#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Decoder lookup tables.
//!
//! A decoder turns a short dataset code (e.g. `"C"` for car, `"130"` for a
//! cause) into a display record with a title and an icon. Tables are loaded
//! once and then handed to the popup formatter as a [`DecoderSnapshot`]: an
//! immutable, cheaply clonable view of whichever tables have arrived so far.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The category a decoder table covers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DecoderCategory {
    /// Narrative cause codes (`"130"`, `"402"`, ...)
    Cause,
    /// Travel modes of the parties involved (car, bicycle, ...)
    Mode,
    /// Primary weather condition
    WeatherPrimary,
    /// Secondary weather condition (frost, strong wind)
    WeatherSecondary,
    /// Natural light conditions
    Light,
    /// Intersection type
    Intersection,
    /// Road curvature
    Curve,
    /// Traffic control at the site
    TrafficControl,
    /// Injury outcomes
    Injury,
}

impl DecoderCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cause,
            Self::Mode,
            Self::WeatherPrimary,
            Self::WeatherSecondary,
            Self::Light,
            Self::Intersection,
            Self::Curve,
            Self::TrafficControl,
            Self::Injury,
        ]
    }

    /// File name the table is conventionally stored under.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Cause => "cause-decoder.json",
            Self::Mode => "mode-decoder.json",
            Self::WeatherPrimary => "weather-primary-decoder.json",
            Self::WeatherSecondary => "weather-secondary-decoder.json",
            Self::Light => "light-decoder.json",
            Self::Intersection => "junction-decoder.json",
            Self::Curve => "curve-decoder.json",
            Self::TrafficControl => "traffic-control-decoder.json",
            Self::Injury => "injury-decoder.json",
        }
    }
}

/// One decoded code.
///
/// Field aliases accept the column names produced by the spreadsheet
/// exports the cause tables were first built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderRecord {
    /// Display text.
    #[serde(alias = "Pretty", alias = "pretty")]
    pub title: String,
    /// Icon path, relative to the icon base directory.
    #[serde(default, deserialize_with = "non_empty")]
    pub icon: Option<String>,
    /// Icon to use in daylight, when it differs.
    #[serde(default, deserialize_with = "non_empty")]
    pub icon_day: Option<String>,
    /// Icon to use at night, when it differs.
    #[serde(default, deserialize_with = "non_empty")]
    pub icon_night: Option<String>,
    /// Grouping label (e.g. `"Driver control"`).
    #[serde(default, alias = "Category", deserialize_with = "non_empty")]
    pub category: Option<String>,
    /// Whether the narrative should name the party the cause applies to.
    #[serde(default, alias = "Requires Subject", deserialize_with = "flag")]
    pub requires_subject: Option<bool>,
}

impl DecoderRecord {
    /// Creates a record with a title and a single icon.
    #[must_use]
    pub fn new(title: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            title: title.into(),
            icon: icon.map(str::to_string),
            icon_day: None,
            icon_night: None,
            category: None,
            requires_subject: None,
        }
    }

    /// Adds day and night icon variants.
    #[must_use]
    pub fn with_variants(mut self, day: &str, night: &str) -> Self {
        self.icon_day = Some(day.to_string());
        self.icon_night = Some(night.to_string());
        self
    }

    /// Picks the icon for the given lighting, falling back to the plain icon.
    #[must_use]
    pub fn icon_for(&self, daylight: bool) -> Option<&str> {
        let variant = if daylight {
            self.icon_day.as_deref()
        } else {
            self.icon_night.as_deref()
        };
        variant.or(self.icon.as_deref())
    }

    /// Whether a narrative sentence for this cause starts with a subject.
    /// Unspecified means yes.
    #[must_use]
    pub fn needs_subject(&self) -> bool {
        self.requires_subject.unwrap_or(true)
    }
}

/// A code -> record lookup for one [`DecoderCategory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecoderTable {
    entries: BTreeMap<String, DecoderRecord>,
}

impl DecoderTable {
    /// Looks up a code, ignoring surrounding whitespace.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&DecoderRecord> {
        self.entries.get(code.trim())
    }

    /// Number of codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates codes and records in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecoderRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, DecoderRecord)> for DecoderTable {
    fn from_iter<T: IntoIterator<Item = (String, DecoderRecord)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Read-only view of the decoder tables loaded so far.
///
/// Tables are shared behind [`Arc`], so cloning a snapshot is cheap. A
/// snapshot never changes once built; adding a table produces a new one.
#[derive(Debug, Clone, Default)]
pub struct DecoderSnapshot {
    tables: BTreeMap<DecoderCategory, Arc<DecoderTable>>,
}

impl DecoderSnapshot {
    /// A snapshot with no tables loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a snapshot that also contains `table`.
    ///
    /// Each category is filled at most once: if the category is already
    /// present, the existing table is kept.
    #[must_use]
    pub fn with_table(mut self, category: DecoderCategory, table: DecoderTable) -> Self {
        self.tables
            .entry(category)
            .or_insert_with(|| Arc::new(table));
        self
    }

    /// The table for `category`, if it has been loaded.
    #[must_use]
    pub fn table(&self, category: DecoderCategory) -> Option<&DecoderTable> {
        self.tables.get(&category).map(Arc::as_ref)
    }

    /// Looks up `code` in the `category` table.
    ///
    /// Returns `None` when the table is not loaded or has no such code.
    #[must_use]
    pub fn lookup(&self, category: DecoderCategory, code: &str) -> Option<&DecoderRecord> {
        self.table(category)?.get(code)
    }

    /// Whether no tables have been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Categories that have been loaded, in declaration order.
    pub fn loaded(&self) -> impl Iterator<Item = (DecoderCategory, &DecoderTable)> {
        self.tables.iter().map(|(c, t)| (*c, t.as_ref()))
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        Some(serde_json::Value::Number(n)) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exported_cause_table() {
        let table: DecoderTable = serde_json::from_value(serde_json::json!({
            "130": {"Pretty": "lost control", "Category": "Driver control", "Requires Subject": "TRUE"},
            "801": {"Pretty": "Slippery road surface", "Category": "Road", "Requires Subject": "FALSE", "icon": ""}
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        let lost = table.get("130").unwrap();
        assert_eq!(lost.title, "lost control");
        assert_eq!(lost.category.as_deref(), Some("Driver control"));
        assert!(lost.needs_subject());

        let slippery = table.get(" 801 ").unwrap();
        assert!(!slippery.needs_subject());
        assert_eq!(slippery.icon, None);
    }

    #[test]
    fn picks_icon_variant() {
        let fine = DecoderRecord::new("Fine", Some("fine.svg")).with_variants("sun.svg", "moon.svg");
        assert_eq!(fine.icon_for(true), Some("sun.svg"));
        assert_eq!(fine.icon_for(false), Some("moon.svg"));

        let rain = DecoderRecord::new("Light rain", Some("rain.svg"));
        assert_eq!(rain.icon_for(false), Some("rain.svg"));
    }

    #[test]
    fn snapshot_fills_each_category_once() {
        let first: DecoderTable = [("C".to_string(), DecoderRecord::new("car", None))]
            .into_iter()
            .collect();
        let second: DecoderTable = [("C".to_string(), DecoderRecord::new("coach", None))]
            .into_iter()
            .collect();

        let snapshot = DecoderSnapshot::empty()
            .with_table(DecoderCategory::Mode, first)
            .with_table(DecoderCategory::Mode, second);

        assert_eq!(
            snapshot.lookup(DecoderCategory::Mode, "C").unwrap().title,
            "car"
        );
        assert!(snapshot.lookup(DecoderCategory::Cause, "130").is_none());
        assert_eq!(snapshot.loaded().count(), 1);
    }

    #[test]
    fn category_names_are_kebab_case() {
        assert_eq!(DecoderCategory::TrafficControl.as_ref(), "traffic-control");
        assert_eq!(
            "weather-primary".parse::<DecoderCategory>().unwrap(),
            DecoderCategory::WeatherPrimary
        );
    }
}
