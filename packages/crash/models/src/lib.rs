#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash incident record types, severity codes and contributing-factor flags.
//!
//! A [`CrashFeature`] is one point of the crash dataset. Its attributes are
//! read leniently from the `GeoJSON` property object: a missing or malformed
//! optional value is treated as absent rather than rejecting the record, so
//! several revisions of the dataset schema can be read by the same code.

pub mod properties;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Worst injury outcome of a crash.
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
pub enum Severity {
    /// At least one person died
    #[serde(rename = "f")]
    #[strum(to_string = "f", serialize = "fatal")]
    Fatal,
    /// At least one serious injury
    #[serde(rename = "s")]
    #[strum(to_string = "s", serialize = "severe", serialize = "serious")]
    Severe,
    /// Minor injuries only
    #[serde(rename = "m")]
    #[strum(to_string = "m", serialize = "minor")]
    Minor,
    /// Nobody was hurt
    #[serde(rename = "n")]
    #[strum(to_string = "n", serialize = "none", serialize = "non-injury")]
    None,
}

impl Severity {
    /// Short code used in the dataset and as the first CSS class tag.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fatal => "f",
            Self::Severe => "s",
            Self::Minor => "m",
            Self::None => "n",
        }
    }

    /// Parses a severity code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not one of the four known values.
    pub fn from_code(code: &str) -> Result<Self, InvalidSeverityError> {
        code.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| InvalidSeverityError {
                code: code.to_string(),
            })
    }

    /// Returns all variants, worst first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fatal, Self::Severe, Self::Minor, Self::None]
    }
}

/// Error returned when a string is not a known [`Severity`] code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The unrecognized code.
    pub code: String,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid severity code {:?}: expected one of f, s, m, n",
            self.code
        )
    }
}

impl std::error::Error for InvalidSeverityError {}

/// A named circumstance recorded as a boolean flag on a crash.
///
/// The string form of each variant is the dataset property key, which is
/// also the CSS class tag the style resolver emits for it.
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
pub enum ContributingFactor {
    /// Overseas driver, tourist or recent migrant involved
    #[serde(rename = "to")]
    #[strum(serialize = "to")]
    Tourist,
    /// Alcohol suspected
    #[serde(rename = "al")]
    #[strum(serialize = "al")]
    Alcohol,
    /// Drugs suspected
    #[serde(rename = "dr")]
    #[strum(serialize = "dr")]
    Drugs,
    /// Cellphone use
    #[serde(rename = "cp")]
    #[strum(serialize = "cp")]
    Cellphone,
    /// Driver fatigue
    #[serde(rename = "fg")]
    #[strum(serialize = "fg")]
    Fatigue,
    /// Excessive speed
    #[serde(rename = "sp")]
    #[strum(serialize = "sp")]
    Speed,
    /// Dangerous or reckless driving
    #[serde(rename = "dd")]
    #[strum(serialize = "dd")]
    DangerousDriving,
    /// A child was harmed
    #[serde(rename = "ca")]
    #[strum(serialize = "ca")]
    ChildHarmed,
    /// Pedestrian involved
    #[serde(rename = "pd")]
    #[strum(serialize = "pd")]
    Pedestrian,
    /// Cyclist involved
    #[serde(rename = "cy")]
    #[strum(serialize = "cy")]
    Cyclist,
    /// Motorcycle involved
    #[serde(rename = "mc")]
    #[strum(serialize = "mc")]
    Motorcycle,
    /// Taxi involved
    #[serde(rename = "tx")]
    #[strum(serialize = "tx")]
    Taxi,
    /// Truck involved
    #[serde(rename = "tr")]
    #[strum(serialize = "tr")]
    Truck,
}

impl ContributingFactor {
    /// Returns all variants in their declared order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Tourist,
            Self::Alcohol,
            Self::Drugs,
            Self::Cellphone,
            Self::Fatigue,
            Self::Speed,
            Self::DangerousDriving,
            Self::ChildHarmed,
            Self::Pedestrian,
            Self::Cyclist,
            Self::Motorcycle,
            Self::Taxi,
            Self::Truck,
        ]
    }
}

/// Region used to pick the local UTC offset of a crash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Everywhere on the main islands (UTC+12:00).
    #[default]
    Mainland,
    /// The Chatham Islands (UTC+12:45).
    ChathamIslands,
}

impl Region {
    /// Offset from UTC in seconds.
    #[must_use]
    pub const fn utc_offset_seconds(self) -> i32 {
        match self {
            Self::Mainland => 12 * 3600,
            Self::ChathamIslands => 12 * 3600 + 45 * 60,
        }
    }
}

/// Posted speed limit at the crash site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedLimit {
    /// A numeric limit in km/h.
    Posted(u16),
    /// Reserved `LSZ` code.
    LimitedSpeedZone,
    /// Recorded as zero.
    Unrestricted,
    /// `U`, blank or unparseable.
    Unknown,
}

impl SpeedLimit {
    /// Parses a speed limit code, which may be a number or a short string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("LSZ") {
            return Self::LimitedSpeedZone;
        }
        match raw.parse::<u16>() {
            Ok(0) => Self::Unrestricted,
            Ok(n) => Self::Posted(n),
            Err(_) => Self::Unknown,
        }
    }

    /// Whether this limit is worth displaying.
    #[must_use]
    pub const fn is_displayable(self) -> bool {
        matches!(self, Self::Posted(_) | Self::LimitedSpeedZone)
    }
}

/// Phase of the moon at the time of the crash.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Buckets a lunar-cycle fraction (0 = new, 0.5 = full) into one of
    /// eight phases. Values outside `0..1` wrap around.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        const PHASES: [MoonPhase; 8] = [
            MoonPhase::New,
            MoonPhase::WaxingCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::Full,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::WaningCrescent,
        ];

        let wrapped = fraction.rem_euclid(1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((wrapped * 8.0) + 0.5).floor() as usize % 8;
        PHASES[idx]
    }

    /// Human-readable name, e.g. `"Waxing crescent moon"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "New moon",
            Self::WaxingCrescent => "Waxing crescent moon",
            Self::FirstQuarter => "First quarter moon",
            Self::WaxingGibbous => "Waxing gibbous moon",
            Self::Full => "Full moon",
            Self::WaningGibbous => "Waning gibbous moon",
            Self::LastQuarter => "Last quarter moon",
            Self::WaningCrescent => "Waning crescent moon",
        }
    }
}

/// One crash incident.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrashFeature {
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Free-text location title.
    pub title: Option<String>,
    /// Road or street name.
    pub road: Option<String>,
    /// Unix timestamp of the crash, in seconds.
    pub timestamp: Option<i64>,
    /// Region used for the local time offset.
    pub region: Region,
    /// Worst injury outcome, if recorded.
    pub severity: Option<Severity>,
    /// Flags that were truthy on the record.
    pub factors: Vec<ContributingFactor>,
    /// Holiday-period label, e.g. `"Easter Holiday 2014"`.
    pub holiday: Option<String>,
    /// Two-character weather code: primary, then secondary.
    pub weather: Option<String>,
    /// Two-character light code: brightness, then street lighting.
    pub light: Option<String>,
    /// Posted speed limit.
    pub speed_limit: Option<SpeedLimit>,
    /// Traffic-control code.
    pub traffic_control: Option<String>,
    /// Intersection-type code.
    pub junction: Option<String>,
    /// Road-curve code.
    pub curve: Option<String>,
    /// Lunar-cycle fraction at the time of the crash.
    pub moon_phase: Option<f64>,
    /// Age of a child harmed in the crash.
    pub child_age: Option<u8>,
    /// Party identifier -> cause codes attributed to that party.
    pub causes: BTreeMap<String, Vec<String>>,
    /// Party identifier -> travel-mode code.
    pub modes: BTreeMap<String, String>,
    /// Travel-mode code -> number of vehicles of that mode.
    pub vehicles: BTreeMap<String, u32>,
    /// Injury-type code -> number of people with that injury.
    pub injuries: BTreeMap<String, u32>,
}

impl CrashFeature {
    /// Whether the given flag was set on the record.
    #[must_use]
    pub fn has_factor(&self, factor: ContributingFactor) -> bool {
        self.factors.contains(&factor)
    }

    /// Primary weather code, if present and not blank.
    #[must_use]
    pub fn weather_primary(&self) -> Option<char> {
        code_char(self.weather.as_deref(), 0)
    }

    /// Secondary weather code, if present and not blank.
    #[must_use]
    pub fn weather_secondary(&self) -> Option<char> {
        code_char(self.weather.as_deref(), 1)
    }

    /// Brightness half of the light code.
    #[must_use]
    pub fn light_brightness(&self) -> Option<char> {
        code_char(self.light.as_deref(), 0)
    }

    /// Whether the crash happened in daylight.
    ///
    /// Twilight (`T`) and dark (`D`) count as night; anything else,
    /// including a missing light code, counts as day.
    #[must_use]
    pub fn is_daylight(&self) -> bool {
        !matches!(self.light_brightness(), Some('T' | 'D'))
    }
}

fn code_char(code: Option<&str>, idx: usize) -> Option<char> {
    code?.chars().nth(idx).filter(|c| !c.is_whitespace())
}
