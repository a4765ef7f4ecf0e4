#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash dataset loading and batch rendering.
//!
//! The dataset is a `GeoJSON` feature collection with one point per crash.
//! [`parse_collection`] reads it, [`crash_feature`] turns one feature into a
//! [`CrashFeature`], and [`render::render_collection`] adds the resolved
//! marker style and popup HTML to every feature.

pub mod progress;
pub mod render;
pub mod road;

use std::path::Path;

use crash_map_crash_models::CrashFeature;
use geojson::{Feature, FeatureCollection, GeoJson};

/// Errors that can occur while reading or writing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error (file read or write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not valid `GeoJSON`.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Valid `GeoJSON`, but not a feature collection.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotACollection,
}

/// Parses a `GeoJSON` feature collection.
///
/// # Errors
///
/// Returns [`DatasetError::GeoJson`] if the text is not `GeoJSON`, or
/// [`DatasetError::NotACollection`] if it is a bare feature or geometry.
pub fn parse_collection(text: &str) -> Result<FeatureCollection, DatasetError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(DatasetError::NotACollection),
    }
}

/// Reads a `GeoJSON` feature collection from disk.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or parsed.
pub async fn load_collection(path: &Path) -> Result<FeatureCollection, DatasetError> {
    let text = tokio::fs::read_to_string(path).await?;
    let collection = parse_collection(&text)?;
    log::info!(
        "Read {} features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Converts one `GeoJSON` feature into a [`CrashFeature`].
///
/// Returns `None` for anything that is not a point, since a crash without a
/// position cannot be drawn. With `normalize_roads` the road name is tidied
/// by [`road::format_nice_road`].
#[must_use]
pub fn crash_feature(feature: &Feature, normalize_roads: bool) -> Option<CrashFeature> {
    let geometry = feature.geometry.as_ref()?;
    let geojson::Value::Point(position) = &geometry.value else {
        return None;
    };
    let (longitude, latitude) = match position.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => return None,
    };

    let empty = serde_json::Map::new();
    let properties = feature.properties.as_ref().unwrap_or(&empty);
    let mut crash = CrashFeature::from_properties(longitude, latitude, properties);

    if normalize_roads {
        crash.road = crash.road.as_deref().map(road::format_nice_road);
    }

    Some(crash)
}

/// Converts every point feature in `collection`, skipping the rest.
#[must_use]
pub fn crash_features(collection: &FeatureCollection, normalize_roads: bool) -> Vec<CrashFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(idx, feature)| {
            let crash = crash_feature(feature, normalize_roads);
            if crash.is_none() {
                log::warn!("Skipping feature {idx}: not a point");
            }
            crash
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::Severity;

    use super::*;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [174.78, -41.29]},
                "properties": {"t": "Lambton Quay", "r": "1/123/4", "ij": "s", "al": true}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[174.0, -41.0], [175.0, -42.0]]},
                "properties": {}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [172.63, -43.53]},
                "properties": null
            }
        ]
    }"#;

    #[test]
    fn reads_point_features() {
        let collection = parse_collection(DATASET).unwrap();
        let crashes = crash_features(&collection, false);

        assert_eq!(crashes.len(), 2);
        assert_eq!(crashes[0].title.as_deref(), Some("Lambton Quay"));
        assert_eq!(crashes[0].severity, Some(Severity::Severe));
        assert!((crashes[0].latitude - -41.29).abs() < f64::EPSILON);
        assert!((crashes[1].longitude - 172.63).abs() < f64::EPSILON);
        assert_eq!(crashes[1].severity, None);
    }

    #[test]
    fn normalizes_roads_on_request() {
        let collection = parse_collection(DATASET).unwrap();
        assert_eq!(
            crash_features(&collection, false)[0].road.as_deref(),
            Some("1/123/4")
        );
        assert_eq!(
            crash_features(&collection, true)[0].road.as_deref(),
            Some("State Highway 1")
        );
    }

    #[test]
    fn rejects_non_collections() {
        let point = r#"{"type": "Point", "coordinates": [174.78, -41.29]}"#;
        assert!(matches!(
            parse_collection(point),
            Err(DatasetError::NotACollection)
        ));
        assert!(matches!(
            parse_collection("not json"),
            Err(DatasetError::GeoJson(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = load_collection(Path::new("/nonexistent/crash_map/data.geojson")).await;
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
