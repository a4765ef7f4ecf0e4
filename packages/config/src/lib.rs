#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash map configuration.
//!
//! The default configuration is embedded at compile time from
//! `config/default.toml`. An override file only needs the sections it
//! changes; anything left out keeps its default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crash_map_decoder::DecoderSource;
use crash_map_decoder_models::DecoderCategory;
use crash_map_popup::{IconOptions, PopupOptions, StreetViewOptions};
use crash_map_style::StyleRules;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where the decoder tables are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Directory the file names are relative to.
    pub dir: PathBuf,
    /// File name per category, keyed by category name (`"cause"`,
    /// `"weather-primary"`, ...). Categories left out use their conventional
    /// name.
    pub files: BTreeMap<String, String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/decoders"),
            files: DecoderCategory::all()
                .iter()
                .map(|category| {
                    (
                        category.to_string(),
                        category.default_file_name().to_string(),
                    )
                })
                .collect(),
        }
    }
}

impl DecoderConfig {
    /// One load source per category.
    #[must_use]
    pub fn sources(&self) -> Vec<DecoderSource> {
        for name in self.files.keys() {
            if name.parse::<DecoderCategory>().is_err() {
                log::warn!("Ignoring decoder file for unknown category {name:?}");
            }
        }

        DecoderCategory::all()
            .iter()
            .map(|category| {
                let name: &str = category.as_ref();
                let file = self
                    .files
                    .get(name)
                    .map_or_else(|| category.default_file_name(), String::as_str);
                DecoderSource {
                    category: *category,
                    path: self.dir.join(file),
                }
            })
            .collect()
    }
}

/// Dataset loading options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetOptions {
    /// Expand abbreviations and tidy road names while loading.
    pub normalize_roads: bool,
}

/// The complete map configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub decoders: DecoderConfig,
    pub style: StyleRules,
    pub street_view: StreetViewOptions,
    pub icons: IconOptions,
    pub dataset: DatasetOptions,
}

impl MapConfig {
    /// Reads an override file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid
    /// configuration TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = parse_config(&text)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Popup presentation options.
    #[must_use]
    pub fn popup_options(&self) -> PopupOptions {
        PopupOptions {
            icons: self.icons.clone(),
            street_view: self.street_view.clone(),
        }
    }

    /// Replaces the decoder directory, keeping the file names.
    #[must_use]
    pub fn with_decoder_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.decoders.dir = dir.into();
        self
    }
}

/// Parses configuration TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Toml`] if the text is not valid configuration.
pub fn parse_config(toml_str: &str) -> Result<MapConfig, ConfigError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// The embedded default configuration.
///
/// # Panics
///
/// Panics if the embedded `default.toml` is malformed. It is compiled in, so
/// this is caught by the tests below.
#[must_use]
pub fn default_config() -> MapConfig {
    parse_config(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to parse embedded default.toml: {e}"))
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::ContributingFactor;

    use super::*;

    #[test]
    fn embedded_default_matches_built_in_defaults() {
        assert_eq!(default_config(), MapConfig::default());
    }

    #[test]
    fn default_sources_use_conventional_names() {
        let sources = default_config().decoders.sources();
        assert_eq!(sources.len(), DecoderCategory::all().len());
        let junction = sources
            .iter()
            .find(|s| s.category == DecoderCategory::Intersection)
            .unwrap();
        assert_eq!(
            junction.path,
            Path::new("data/decoders").join("junction-decoder.json")
        );
    }

    #[test]
    fn override_keeps_unmentioned_sections() {
        let config = parse_config(
            r#"
            [street_view]
            fov = 90
            api_key = "secret"

            [style.holidays]
            "Labour Weekend 2014" = "Labour2014"

            [decoders.files]
            cause = "causes.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.street_view.effective_fov(), 120);
        assert_eq!(config.street_view.pitch, -15);
        assert_eq!(config.street_view.api_key.as_deref(), Some("secret"));
        assert_eq!(config.style.holidays.len(), 1);
        assert_eq!(config.style.flags.len(), ContributingFactor::all().len());
        assert_eq!(config.icons, IconOptions::default());

        let sources = config.decoders.sources();
        let cause = sources
            .iter()
            .find(|s| s.category == DecoderCategory::Cause)
            .unwrap();
        assert!(cause.path.ends_with("causes.csv"));
        let mode = sources
            .iter()
            .find(|s| s.category == DecoderCategory::Mode)
            .unwrap();
        assert!(mode.path.ends_with("mode-decoder.json"));
    }

    #[test]
    fn rejects_unknown_flag() {
        let result = parse_config(
            r#"
            [[style.flags]]
            flag = "zz"
            tag = "zz"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn with_decoder_dir_keeps_file_names() {
        let config = default_config().with_decoder_dir("/srv/decoders");
        assert!(
            config
                .decoders
                .sources()
                .iter()
                .all(|s| s.path.starts_with("/srv/decoders"))
        );
    }
}
