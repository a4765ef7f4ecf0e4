#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Decoder table loading.
//!
//! Every table is read once at startup, concurrently, from a JSON or CSV
//! file. A table that fails to load is logged and left out of the resulting
//! [`DecoderSnapshot`]; the popup formatter then renders the fields that
//! depend on it as empty instead of failing.

pub mod csv_table;

use std::path::{Path, PathBuf};

use crash_map_decoder_models::{DecoderCategory, DecoderSnapshot, DecoderTable};

/// Errors that can occur while loading a decoder table.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is neither `.json` nor `.csv`.
    #[error("Unknown decoder file format: {}", path.display())]
    UnknownFormat {
        /// The offending path.
        path: PathBuf,
    },
}

/// Where to load one decoder table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderSource {
    /// Which table this file fills.
    pub category: DecoderCategory,
    /// Path to a `.json` or `.csv` file.
    pub path: PathBuf,
}

impl DecoderSource {
    /// Source for `category` under `dir` using its conventional file name.
    #[must_use]
    pub fn conventional(dir: &Path, category: DecoderCategory) -> Self {
        Self {
            category,
            path: dir.join(category.default_file_name()),
        }
    }
}

/// Sources for every category under `dir`, using conventional file names.
#[must_use]
pub fn conventional_sources(dir: &Path) -> Vec<DecoderSource> {
    DecoderCategory::all()
        .iter()
        .map(|category| DecoderSource::conventional(dir, *category))
        .collect()
}

/// Parses a JSON decoder table (`{ "<code>": { "title": ..., ... } }`).
///
/// # Errors
///
/// Returns [`DecoderError::Json`] if the text is not a valid table.
pub fn parse_json(text: &str) -> Result<DecoderTable, DecoderError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads one decoder table, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns [`DecoderError`] if the file cannot be read or parsed, or has an
/// unsupported extension.
pub async fn load_table(path: &Path) -> Result<DecoderTable, DecoderError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let text = tokio::fs::read_to_string(path).await?;
            parse_json(&text)
        }
        Some("csv") => {
            let text = tokio::fs::read_to_string(path).await?;
            csv_table::parse_csv(&text)
        }
        _ => Err(DecoderError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Loads all `sources` concurrently and returns a snapshot of the tables
/// that loaded successfully.
///
/// Failures are logged and skipped. If two sources name the same category,
/// the first one listed wins.
pub async fn load_all(sources: &[DecoderSource]) -> DecoderSnapshot {
    let results = futures::future::join_all(
        sources
            .iter()
            .map(|source| async move { (source, load_table(&source.path).await) }),
    )
    .await;

    let mut snapshot = DecoderSnapshot::empty();

    for (source, result) in results {
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} {} decoder entries from {}",
                    table.len(),
                    source.category,
                    source.path.display()
                );
                if snapshot.table(source.category).is_some() {
                    log::warn!(
                        "Ignoring duplicate {} decoder from {}",
                        source.category,
                        source.path.display()
                    );
                    continue;
                }
                snapshot = snapshot.with_table(source.category, table);
            }
            Err(e) => {
                log::warn!(
                    "{} decoder unavailable ({}): {e}",
                    source.category,
                    source.path.display()
                );
            }
        }
    }

    log::debug!(
        "Decoder snapshot has {}/{} tables",
        snapshot.loaded().count(),
        DecoderCategory::all().len()
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crash_map_decoder_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_json_table() {
        let table = parse_json(r#"{"C": {"title": "car", "icon": "car.svg"}}"#).unwrap();
        assert_eq!(table.get("C").unwrap().icon.as_deref(), Some("car.svg"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_json("[1, 2"), Err(DecoderError::Json(_))));
    }

    #[test]
    fn conventional_sources_cover_every_category() {
        let sources = conventional_sources(Path::new("data/decoders"));
        assert_eq!(sources.len(), DecoderCategory::all().len());
        assert_eq!(
            sources[0].path,
            Path::new("data/decoders/cause-decoder.json")
        );
    }

    #[tokio::test]
    async fn missing_files_yield_empty_snapshot() {
        let sources = conventional_sources(Path::new("/nonexistent/crash_map/decoders"));
        let snapshot = load_all(&sources).await;
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn unknown_extension_is_rejected() {
        let result = load_table(Path::new("modes.yaml")).await;
        assert!(matches!(result, Err(DecoderError::UnknownFormat { .. })));
    }

    #[tokio::test]
    async fn loads_available_tables_and_skips_broken_ones() {
        let dir = scratch_dir("partial");
        std::fs::write(
            dir.join("mode-decoder.json"),
            r#"{"C": {"title": "car", "icon": "car.svg"}, "S": {"title": "cyclist"}}"#,
        )
        .unwrap();
        std::fs::write(dir.join("cause-decoder.json"), "not json").unwrap();
        std::fs::write(
            dir.join("injury.csv"),
            "code,title,icon\nf,killed,dead.svg\ns,seriously injured,hurt.svg\n",
        )
        .unwrap();

        let mut sources = conventional_sources(&dir);
        sources.push(DecoderSource {
            category: DecoderCategory::Injury,
            path: dir.join("injury.csv"),
        });

        let snapshot = load_all(&sources).await;

        assert_eq!(
            snapshot.lookup(DecoderCategory::Mode, "S").unwrap().title,
            "cyclist"
        );
        assert!(snapshot.table(DecoderCategory::Cause).is_none());
        assert_eq!(
            snapshot.lookup(DecoderCategory::Injury, "f").unwrap().title,
            "killed"
        );
        assert_eq!(snapshot.loaded().count(), 2);

        std::fs::remove_dir_all(dir).ok();
    }
}
