//! Lenient extraction of [`CrashFeature`] attributes from a `GeoJSON`
//! property object.
//!
//! Each attribute is looked up under its short dataset key first and then
//! under a long-form alias. Values of the wrong JSON type are treated as
//! absent so that one malformed field never drops the whole record.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{ContributingFactor, CrashFeature, Region, Severity, SpeedLimit};

impl CrashFeature {
    /// Builds a crash record from a point coordinate and its property object.
    #[must_use]
    pub fn from_properties(longitude: f64, latitude: f64, props: &Map<String, Value>) -> Self {
        let factors = ContributingFactor::all()
            .iter()
            .copied()
            .filter(|factor| {
                let key: &str = factor.as_ref();
                props.get(key).is_some_and(is_truthy)
            })
            .collect();

        let region = if lookup(props, &["ch", "chathams"]).is_some_and(is_truthy) {
            Region::ChathamIslands
        } else {
            Region::Mainland
        };

        Self {
            longitude,
            latitude,
            title: get_string(props, &["t", "title"]),
            road: get_string(props, &["r", "road"]),
            timestamp: get_i64(props, &["ts", "timestamp"]),
            region,
            severity: get_string(props, &["ij", "injury"])
                .and_then(|code| Severity::from_code(&code).ok()),
            factors,
            holiday: get_string(props, &["h", "holiday"]),
            weather: get_code(props, &["w", "weather"]),
            light: get_code(props, &["l", "light"]),
            speed_limit: get_string(props, &["spd", "speed_limit"])
                .map(|raw| SpeedLimit::parse(&raw)),
            traffic_control: get_string(props, &["tc", "traffic_control"]),
            junction: get_string(props, &["jt", "junction"]),
            curve: get_string(props, &["cu", "curve"]),
            moon_phase: lookup(props, &["mp", "moon_phase"]).and_then(Value::as_f64),
            child_age: get_i64(props, &["cage", "child_age"])
                .and_then(|age| u8::try_from(age).ok()),
            causes: get_list_map(props, &["c", "causes"]),
            modes: get_string_map(props, &["m", "modes"]),
            vehicles: get_count_map(props, &["v", "vehicles"]),
            injuries: get_count_map(props, &["i", "injuries"]),
        }
    }
}

/// Interprets a flag value from any schema revision.
///
/// Booleans are used as-is, numbers are truthy when non-zero, and strings
/// are truthy unless blank or an explicit negative (`"0"`, `"false"`,
/// `"no"`). Everything else is falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty()
                || s == "0"
                || s.eq_ignore_ascii_case("false")
                || s.eq_ignore_ascii_case("no"))
        }
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn lookup<'a>(props: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| props.get(*key).filter(|v| !v.is_null()))
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn get_string(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    lookup(props, keys).and_then(value_to_string)
}

/// Like [`get_string`] but keeps positional blanks inside multi-character
/// codes (e.g. `"F "` for fine weather with no secondary condition).
fn get_code(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match lookup(props, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn get_i64(props: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    match lookup(props, keys)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            #[allow(clippy::cast_possible_truncation)]
            let whole = n.as_f64().map(|f| f as i64);
            whole
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn get_string_map(props: &Map<String, Value>, keys: &[&str]) -> BTreeMap<String, String> {
    let Some(Value::Object(obj)) = lookup(props, keys) else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter_map(|(k, v)| value_to_string(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Accepts either an array of codes or a single space-delimited string per
/// party (older listings use `"308A 371A"`-style strings).
fn get_list_map(props: &Map<String, Value>, keys: &[&str]) -> BTreeMap<String, Vec<String>> {
    let Some(Value::Object(obj)) = lookup(props, keys) else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter_map(|(party, v)| {
            let codes: Vec<String> = match v {
                Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
                Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
                Value::Number(n) => vec![n.to_string()],
                _ => Vec::new(),
            };
            (!codes.is_empty()).then(|| (party.clone(), codes))
        })
        .collect()
}

fn get_count_map(props: &Map<String, Value>, keys: &[&str]) -> BTreeMap<String, u32> {
    let Some(Value::Object(obj)) = lookup(props, keys) else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter_map(|(k, v)| {
            let count = match v {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            Some((k.clone(), count))
        })
        .collect()
}
