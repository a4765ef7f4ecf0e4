//! Batch rendering of a whole dataset.
//!
//! Every point feature keeps its original properties and gains two more:
//! `style`, the marker options from the style resolver, and `popup`, the
//! popup HTML. The output collection can be handed straight to a map page
//! without any formatting logic of its own.

use std::collections::BTreeMap;
use std::sync::Arc;

use crash_map_crash_models::CrashFeature;
use crash_map_decoder_models::DecoderSnapshot;
use crash_map_popup::PopupOptions;
use crash_map_style::StyleRules;
use geojson::{Feature, FeatureCollection};

use crate::progress::ProgressCallback;
use crate::{DatasetError, crash_feature};

/// Everything rendering needs besides the data itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub rules: &'a StyleRules,
    pub decoders: &'a DecoderSnapshot,
    pub popup: &'a PopupOptions,
    pub normalize_roads: bool,
}

/// Counts from one render run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: u64,
    pub skipped: u64,
}

/// Adds `style` and `popup` properties to one feature.
///
/// # Errors
///
/// Returns [`DatasetError::Json`] if the style cannot be serialized.
pub fn render_feature(
    crash: &CrashFeature,
    ctx: &RenderContext<'_>,
    feature: &mut Feature,
) -> Result<(), DatasetError> {
    let style = serde_json::to_value(crash_map_style::resolve(crash, ctx.rules))?;
    let popup = crash_map_popup::format_popup(crash, ctx.decoders, ctx.popup).to_html();

    let properties = feature.properties.get_or_insert_with(serde_json::Map::new);
    properties.insert("style".to_string(), style);
    properties.insert("popup".to_string(), serde_json::Value::String(popup));
    Ok(())
}

/// Renders every point feature of `collection`.
///
/// Features that are not points are dropped from the output and counted as
/// skipped.
///
/// # Errors
///
/// Returns [`DatasetError::Json`] if a style cannot be serialized.
pub fn render_collection(
    collection: FeatureCollection,
    ctx: &RenderContext<'_>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<(FeatureCollection, RenderSummary), DatasetError> {
    let FeatureCollection {
        bbox,
        features,
        foreign_members,
    } = collection;

    progress.set_total(features.len() as u64);
    progress.set_message("Rendering crashes".to_string());

    let mut summary = RenderSummary::default();
    let mut rendered = Vec::with_capacity(features.len());

    for (idx, mut feature) in features.into_iter().enumerate() {
        progress.inc(1);
        let Some(crash) = crash_feature(&feature, ctx.normalize_roads) else {
            log::warn!("Skipping feature {idx}: not a point");
            summary.skipped += 1;
            continue;
        };
        render_feature(&crash, ctx, &mut feature)?;
        rendered.push(feature);
        summary.rendered += 1;
    }

    progress.finish(format!(
        "Rendered {} crashes ({} skipped)",
        summary.rendered, summary.skipped
    ));
    log::info!(
        "Rendered {} crashes, skipped {}",
        summary.rendered,
        summary.skipped
    );

    Ok((
        FeatureCollection {
            bbox,
            features: rendered,
            foreign_members,
        },
        summary,
    ))
}

/// How many crashes carry each class tag.
#[must_use]
pub fn tag_counts(crashes: &[CrashFeature], rules: &StyleRules) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for crash in crashes {
        for tag in crash_map_style::resolve(crash, rules).class_tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::{ContributingFactor, Severity};

    use super::*;
    use crate::parse_collection;
    use crate::progress::null_progress;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [174.78, -41.29]},
                "properties": {"t": "Lambton Quay", "ts": 1393626600, "ij": "f", "al": 1, "id": 7}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"t": "Nowhere"}
            }
        ]
    }"#;

    #[test]
    fn adds_style_and_popup_properties() {
        let rules = StyleRules::default();
        let decoders = DecoderSnapshot::empty();
        let popup = PopupOptions::default();
        let ctx = RenderContext {
            rules: &rules,
            decoders: &decoders,
            popup: &popup,
            normalize_roads: false,
        };

        let (output, summary) =
            render_collection(parse_collection(DATASET).unwrap(), &ctx, &null_progress()).unwrap();

        assert_eq!(
            summary,
            RenderSummary {
                rendered: 1,
                skipped: 1
            }
        );
        assert_eq!(output.features.len(), 1);

        let properties = output.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["id"], 7);
        assert_eq!(properties["style"]["className"], "f al");
        assert_eq!(properties["style"]["fillColor"], "#ff1a1a");

        let html = properties["popup"].as_str().unwrap();
        assert!(html.starts_with(r#"<span class="crash-location">Lambton Quay</span>"#));
        assert!(html.contains(r#"<span class="date">Saturday, 1st March 2014</span>"#));
    }

    #[test]
    fn counts_class_tags() {
        let crashes = vec![
            CrashFeature {
                severity: Some(Severity::Fatal),
                factors: vec![ContributingFactor::Alcohol],
                ..CrashFeature::default()
            },
            CrashFeature {
                severity: Some(Severity::Minor),
                factors: vec![ContributingFactor::Alcohol, ContributingFactor::Speed],
                ..CrashFeature::default()
            },
        ];
        let counts = tag_counts(&crashes, &StyleRules::default());
        assert_eq!(counts.get("al"), Some(&2));
        assert_eq!(counts.get("f"), Some(&1));
        assert_eq!(counts.get("sp"), Some(&1));
        assert_eq!(counts.get("dr"), None);
    }
}
