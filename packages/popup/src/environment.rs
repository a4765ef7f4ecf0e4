//! The environment icon cluster: weather, speed limit, road layout, child
//! and moon.

use crash_map_crash_models::{CrashFeature, MoonPhase, SpeedLimit};
use crash_map_decoder_models::{DecoderCategory, DecoderSnapshot};

use crate::fragment::{Element, Node};
use crate::icons::IconOptions;
use crate::words::{capitalize, indefinite_article};

/// Builds the icons of the environment cluster, in display order.
///
/// Every part is optional; a part whose code is missing or cannot be
/// decoded is left out.
#[must_use]
pub fn environment_icons(
    feature: &CrashFeature,
    decoders: &DecoderSnapshot,
    icons: &IconOptions,
) -> Vec<Node> {
    let daylight = feature.is_daylight();
    let decoded = |category: DecoderCategory, code: Option<&str>, class: &str| {
        code.and_then(|code| icons.decoded_icon(decoders, category, code, daylight, class))
    };

    let primary = feature.weather_primary().map(String::from);
    let secondary = feature.weather_secondary().map(String::from);

    [
        decoded(
            DecoderCategory::WeatherPrimary,
            primary.as_deref(),
            "weather",
        ),
        decoded(
            DecoderCategory::WeatherSecondary,
            secondary.as_deref(),
            "weather",
        ),
        feature.speed_limit.and_then(speed_limit),
        decoded(
            DecoderCategory::TrafficControl,
            feature.traffic_control.as_deref(),
            "traffic-control",
        ),
        decoded(
            DecoderCategory::Intersection,
            feature.junction.as_deref(),
            "intersection",
        ),
        decoded(DecoderCategory::Curve, feature.curve.as_deref(), "curve"),
        feature.child_age.map(|age| child_icon(age, icons)),
        moon_icon(feature, decoders, icons),
    ]
    .into_iter()
    .flatten()
    .map(Node::from)
    .collect()
}

/// The speed-limit badge, or `None` for limits that are not shown.
#[must_use]
pub fn speed_limit(limit: SpeedLimit) -> Option<Element> {
    let (label, title) = match limit {
        SpeedLimit::Posted(n) => (n.to_string(), format!("{n} km/h speed limit")),
        SpeedLimit::LimitedSpeedZone => ("LSZ".to_string(), "Limited speed zone".to_string()),
        SpeedLimit::Unrestricted | SpeedLimit::Unknown => return None,
    };
    Some(
        Element::new("span")
            .class("speed-limit")
            .attr("title", title)
            .text(label),
    )
}

/// The child-harmed icon, titled e.g. "An 8 year old child was harmed".
#[must_use]
pub fn child_icon(age: u8, icons: &IconOptions) -> Element {
    let article = capitalize(indefinite_article(u32::from(age)));
    let title = format!("{article} {age} year old child was harmed");
    icons.icon(&icons.child, &title, "child")
}

fn moon_icon(
    feature: &CrashFeature,
    decoders: &DecoderSnapshot,
    icons: &IconOptions,
) -> Option<Element> {
    if feature.is_daylight() {
        return None;
    }
    let phase = MoonPhase::from_fraction(feature.moon_phase?);

    let light = feature
        .light_brightness()
        .and_then(|code| decoders.lookup(DecoderCategory::Light, &code.to_string()));
    let title = light.map_or_else(
        || phase.name().to_string(),
        |light| format!("{}, {}", light.title, phase.name()),
    );

    let src = format!("{}/{phase}.svg", icons.moon_dir.trim_end_matches('/'));
    Some(icons.icon(&src, &title, "moon"))
}

#[cfg(test)]
mod tests {
    use crash_map_decoder_models::{DecoderRecord, DecoderTable};

    use super::*;

    fn table(entries: &[(&str, DecoderRecord)]) -> DecoderTable {
        entries
            .iter()
            .map(|(code, record)| ((*code).to_string(), record.clone()))
            .collect()
    }

    fn decoders() -> DecoderSnapshot {
        DecoderSnapshot::empty()
            .with_table(
                DecoderCategory::WeatherPrimary,
                table(&[(
                    "F",
                    DecoderRecord::new("Fine", None).with_variants("sun.svg", "clear-night.svg"),
                )]),
            )
            .with_table(
                DecoderCategory::WeatherSecondary,
                table(&[("S", DecoderRecord::new("Strong wind", Some("wind.svg")))]),
            )
            .with_table(
                DecoderCategory::Light,
                table(&[("D", DecoderRecord::new("Dark", None))]),
            )
            .with_table(
                DecoderCategory::Curve,
                table(&[("E", DecoderRecord::new("Easy curve", Some("easy-curve.svg")))]),
            )
    }

    fn titles(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(Node::as_element)
            .filter_map(|el| el.get_attr("title").map(str::to_string))
            .collect()
    }

    #[test]
    fn night_crash_shows_night_variant_and_moon() {
        let feature = CrashFeature {
            weather: Some("FS".to_string()),
            light: Some("DO".to_string()),
            speed_limit: Some(SpeedLimit::Posted(100)),
            curve: Some("E".to_string()),
            moon_phase: Some(0.5),
            ..CrashFeature::default()
        };
        let nodes = environment_icons(&feature, &decoders(), &IconOptions::default());

        assert_eq!(
            titles(&nodes),
            [
                "Fine",
                "Strong wind",
                "100 km/h speed limit",
                "Easy curve",
                "Dark, Full moon"
            ]
        );
        let weather = nodes[0].as_element().unwrap();
        assert_eq!(weather.get_attr("src"), Some("./icons/clear-night.svg"));
        let moon = nodes[4].as_element().unwrap();
        assert_eq!(moon.get_attr("src"), Some("./icons/moon/full.svg"));
    }

    #[test]
    fn daytime_crash_has_no_moon() {
        let feature = CrashFeature {
            weather: Some("F ".to_string()),
            light: Some("BN".to_string()),
            moon_phase: Some(0.5),
            ..CrashFeature::default()
        };
        let nodes = environment_icons(&feature, &decoders(), &IconOptions::default());
        assert_eq!(titles(&nodes), ["Fine"]);
        assert_eq!(
            nodes[0].as_element().unwrap().get_attr("src"),
            Some("./icons/sun.svg")
        );
    }

    #[test]
    fn moon_title_falls_back_to_phase_name() {
        let feature = CrashFeature {
            light: Some("T ".to_string()),
            moon_phase: Some(0.0),
            ..CrashFeature::default()
        };
        let nodes = environment_icons(&feature, &DecoderSnapshot::empty(), &IconOptions::default());
        assert_eq!(titles(&nodes), ["New moon"]);
    }

    #[test]
    fn unknown_speed_limits_are_suppressed() {
        assert!(speed_limit(SpeedLimit::Unknown).is_none());
        assert!(speed_limit(SpeedLimit::Unrestricted).is_none());
        assert_eq!(
            speed_limit(SpeedLimit::LimitedSpeedZone).unwrap().to_string(),
            r#"<span class="speed-limit" title="Limited speed zone">LSZ</span>"#
        );
    }

    #[test]
    fn child_article_follows_spoken_age() {
        let icons = IconOptions::default();
        assert_eq!(
            child_icon(8, &icons).get_attr("title"),
            Some("An 8 year old child was harmed")
        );
        assert_eq!(
            child_icon(11, &icons).get_attr("title"),
            Some("An 11 year old child was harmed")
        );
        assert_eq!(
            child_icon(7, &icons).get_attr("title"),
            Some("A 7 year old child was harmed")
        );
        assert_eq!(
            child_icon(7, &icons).get_attr("src"),
            Some("./icons/child.svg")
        );
    }

    #[test]
    fn missing_tables_leave_only_unconditional_icons() {
        let feature = CrashFeature {
            weather: Some("FS".to_string()),
            traffic_control: Some("T".to_string()),
            junction: Some("X".to_string()),
            child_age: Some(4),
            ..CrashFeature::default()
        };
        let nodes = environment_icons(&feature, &DecoderSnapshot::empty(), &IconOptions::default());
        assert_eq!(titles(&nodes), ["A 4 year old child was harmed"]);
    }
}
