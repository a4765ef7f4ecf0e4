#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Popup formatting for crash points.
//!
//! [`format_popup`] turns one [`CrashFeature`] and the decoder tables loaded
//! so far into a [`Popup`]: the location, local date and time, environment
//! icons, road, street-view thumbnail, vehicle and injury icons and the
//! causal narrative. Formatting never fails. Anything that cannot be decoded
//! yet (a table still loading, an unknown code, a missing field) is left
//! empty and the rest of the popup is still produced.

pub mod datetime;
pub mod environment;
pub mod fragment;
pub mod icons;
pub mod narrative;
pub mod parties;
pub mod streetview;
pub mod words;

use crash_map_crash_models::CrashFeature;
use crash_map_decoder_models::DecoderSnapshot;
use serde::{Deserialize, Serialize};

pub use fragment::{Element, Fragment, Node};
pub use icons::IconOptions;
pub use streetview::StreetViewOptions;

/// Presentation settings for popups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    pub icons: IconOptions,
    pub street_view: StreetViewOptions,
}

/// The formatted parts of one popup, before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Location title.
    pub location: String,
    /// Long local date, or empty without a timestamp.
    pub date: String,
    /// Local `HH:MM` time, or empty without a timestamp.
    pub time: String,
    /// Environment cluster icons.
    pub environment: Vec<Node>,
    /// Road name.
    pub road: String,
    /// Street-view thumbnail link.
    pub street_view: Element,
    /// One icon per vehicle.
    pub vehicles: Vec<Node>,
    /// One icon per injured person.
    pub injuries: Vec<Node>,
    /// Tooltip for the injury icons, e.g. `"2 people killed"`.
    pub injury_summary: Option<String>,
    /// Causal narrative sentences.
    pub narrative: Vec<String>,
}

impl Popup {
    /// Lays the parts out as the popup markup tree.
    #[must_use]
    pub fn to_fragment(&self) -> Fragment {
        let mut injuries = Element::new("div")
            .class("injury-icons")
            .children(self.injuries.iter().cloned());
        if let Some(summary) = &self.injury_summary {
            injuries = injuries.attr("title", summary.clone());
        }

        Fragment(vec![
            Element::new("span")
                .class("crash-location")
                .text(self.location.clone())
                .into(),
            Element::new("span")
                .class("date")
                .text(self.date.clone())
                .into(),
            Element::new("span")
                .class("time")
                .text(self.time.clone())
                .into(),
            Element::new("span")
                .child(
                    Element::new("div")
                        .class("environment-icons")
                        .children(self.environment.iter().cloned()),
                )
                .into(),
            Element::new("span")
                .class("road")
                .text(self.road.clone())
                .into(),
            Element::new("span")
                .child(
                    Element::new("div")
                        .class("streetview-container")
                        .child(self.street_view.clone()),
                )
                .into(),
            Element::new("span")
                .child(
                    Element::new("div")
                        .class("vehicle-injury")
                        .child(
                            Element::new("div")
                                .class("vehicle-icons")
                                .children(self.vehicles.iter().cloned()),
                        )
                        .child(injuries)
                        .child(Element::new("div").class("clear")),
                )
                .into(),
            Element::new("span")
                .class("causes-text")
                .text(self.narrative.join(" "))
                .into(),
        ])
    }

    /// Serializes the popup to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_fragment().to_html()
    }
}

/// Formats the popup for `feature` with whatever decoders are loaded.
#[must_use]
pub fn format_popup(
    feature: &CrashFeature,
    decoders: &DecoderSnapshot,
    options: &PopupOptions,
) -> Popup {
    let local = feature
        .timestamp
        .and_then(|ts| datetime::local_time(ts, feature.region));

    Popup {
        location: feature.title.clone().unwrap_or_default(),
        date: local.as_ref().map(datetime::format_date).unwrap_or_default(),
        time: local.as_ref().map(datetime::format_time).unwrap_or_default(),
        environment: environment::environment_icons(feature, decoders, &options.icons),
        road: feature.road.clone().unwrap_or_default(),
        street_view: streetview::street_view(
            feature.latitude,
            feature.longitude,
            &options.street_view,
        ),
        vehicles: parties::vehicle_icons(&feature.vehicles, decoders, &options.icons),
        injuries: parties::injury_icons(&feature.injuries, decoders, &options.icons),
        injury_summary: parties::injury_summary(&feature.injuries, decoders),
        narrative: narrative::causal_sentences(feature, decoders),
    }
}
