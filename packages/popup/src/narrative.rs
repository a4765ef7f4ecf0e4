//! Causal narrative: one sentence per decoded cause code.
//!
//! Parties are identified by the keys of the cause map (`A`, `B`, ...,
//! `Environment`). A party's sentences name its travel mode ("The car lost
//! control."), and when several vehicles of that mode were involved the mode
//! is told apart with an ordinal ("The second car ...").

use std::collections::BTreeMap;

use crash_map_crash_models::CrashFeature;
use crash_map_decoder_models::{DecoderCategory, DecoderRecord, DecoderSnapshot};

use crate::words::{capitalize, ordinal_words};

/// Builds the causal narrative sentences for `feature`.
///
/// With no decoder tables loaded at all this is empty, so raw codes are
/// never shown. Unknown cause codes and undecodable modes are skipped.
#[must_use]
pub fn causal_sentences(feature: &CrashFeature, decoders: &DecoderSnapshot) -> Vec<String> {
    if decoders.is_empty() {
        return Vec::new();
    }

    let ordinals = mode_ordinals(feature);
    let mut sentences = Vec::new();

    for party in party_order(feature.causes.keys()) {
        let Some(codes) = feature.causes.get(party) else {
            continue;
        };
        let mode = feature.modes.get(party);

        for code in codes {
            let Some(cause) = lookup_cause(decoders, code, party) else {
                continue;
            };
            let pretty = cause.title.trim().trim_end_matches('.');
            if pretty.is_empty() {
                continue;
            }

            let sentence = match mode {
                Some(mode) if cause.needs_subject() => {
                    let Some(mode_record) = decoders.lookup(DecoderCategory::Mode, mode) else {
                        continue;
                    };
                    let count = ordinals
                        .get(party.as_str())
                        .map(|n| format!("{} ", ordinal_words(*n)))
                        .unwrap_or_default();
                    format!(
                        "The {count}{} {pretty}.",
                        mode_record.title.trim().to_lowercase()
                    )
                }
                _ => format!("{}.", capitalize(pretty)),
            };
            sentences.push(sentence);
        }
    }

    sentences
}

/// The narrative as a single paragraph.
#[must_use]
pub fn causal_narrative(feature: &CrashFeature, decoders: &DecoderSnapshot) -> String {
    causal_sentences(feature, decoders).join(" ")
}

/// Single-letter parties first, then everything else; each group sorted.
fn party_order<'a>(parties: impl Iterator<Item = &'a String>) -> Vec<&'a String> {
    let mut parties: Vec<&String> = parties.collect();
    parties.sort_by(|a, b| {
        let long = |p: &str| p.chars().count() != 1;
        long(a).cmp(&long(b)).then_with(|| a.cmp(b))
    });
    parties
}

/// Ordinal for every party whose mode is repeated.
///
/// A mode is repeated when more than one vehicle of it was involved or more
/// than one party travelled by it. Vehicles with no recorded party take the
/// earliest ordinals, so the recorded parties are numbered from the end.
fn mode_ordinals(feature: &CrashFeature) -> BTreeMap<&str, u32> {
    let mut by_mode: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for party in party_order(feature.modes.keys()) {
        if let Some(mode) = feature.modes.get(party) {
            by_mode
                .entry(mode.trim())
                .or_default()
                .push(party.as_str());
        }
    }

    let mut ordinals = BTreeMap::new();
    for (mode, parties) in by_mode {
        let sharing = u32::try_from(parties.len()).unwrap_or(u32::MAX);
        let vehicles = feature.vehicles.get(mode).copied().unwrap_or(0);
        if vehicles <= 1 && sharing <= 1 {
            continue;
        }

        let unrecorded = vehicles.max(sharing) - sharing;
        for (rank, party) in (1..).zip(parties) {
            ordinals.insert(party, rank + unrecorded);
        }
    }
    ordinals
}

/// Looks a cause code up, retrying without a trailing party letter
/// (`"130A"` -> `"130"`).
fn lookup_cause<'a>(
    decoders: &'a DecoderSnapshot,
    code: &str,
    party: &str,
) -> Option<&'a DecoderRecord> {
    let code = code.trim();
    decoders.lookup(DecoderCategory::Cause, code).or_else(|| {
        let stripped = code
            .strip_suffix(party)
            .or_else(|| code.strip_suffix(|c: char| c.is_ascii_alphabetic()))?;
        if stripped.is_empty() {
            return None;
        }
        decoders.lookup(DecoderCategory::Cause, stripped)
    })
}
