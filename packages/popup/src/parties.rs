//! Vehicle and injury icon rows.

use std::collections::BTreeMap;

use crash_map_decoder_models::{DecoderCategory, DecoderSnapshot};

use crate::fragment::Node;
use crate::icons::IconOptions;
use crate::words::grammar;

/// Most icons drawn for a single vehicle mode or injury type.
pub const MAX_ICONS: u32 = 50;

/// One icon per vehicle, grouped by mode in code order.
#[must_use]
pub fn vehicle_icons(
    vehicles: &BTreeMap<String, u32>,
    decoders: &DecoderSnapshot,
    icons: &IconOptions,
) -> Vec<Node> {
    repeated_icons(vehicles, DecoderCategory::Mode, "vehicle", decoders, icons)
}

/// One icon per injured person, grouped by injury type in code order.
#[must_use]
pub fn injury_icons(
    injuries: &BTreeMap<String, u32>,
    decoders: &DecoderSnapshot,
    icons: &IconOptions,
) -> Vec<Node> {
    repeated_icons(injuries, DecoderCategory::Injury, "injury", decoders, icons)
}

/// Summary of the injury counts, e.g. `"2 people killed, 1 person injured"`.
///
/// Injury titles are lowercased and read after "person"/"people", so they
/// must be past participles ("Killed", "Injured") rather than adjectives.
/// Returns `None` when nothing can be decoded.
#[must_use]
pub fn injury_summary(injuries: &BTreeMap<String, u32>, decoders: &DecoderSnapshot) -> Option<String> {
    let parts: Vec<String> = injuries
        .iter()
        .filter(|(_, count)| **count > 0)
        .filter_map(|(code, count)| {
            let record = decoders.lookup(DecoderCategory::Injury, code)?;
            Some(format!(
                "{count} {} {}",
                grammar("person", "people", *count),
                record.title.to_lowercase()
            ))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn repeated_icons(
    counts: &BTreeMap<String, u32>,
    category: DecoderCategory,
    class: &str,
    decoders: &DecoderSnapshot,
    icons: &IconOptions,
) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (code, count) in counts {
        let Some(icon) = icons.decoded_icon(decoders, category, code, true, class) else {
            continue;
        };
        if *count > MAX_ICONS {
            log::warn!("Skipping {count} {class} icons for code {code:?}: more than {MAX_ICONS}");
            continue;
        }
        for _ in 0..*count {
            nodes.push(Node::from(icon.clone()));
        }
    }
    nodes
}
