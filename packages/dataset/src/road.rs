//! Road-name tidying.
//!
//! Crash locations are recorded in a terse police shorthand: state highways
//! as linear references (`1/123/4`), off-road sites with a `Z` marker and a
//! site code (`Z CPK`), and plenty of abbreviations. [`format_nice_road`]
//! turns them into something readable.

/// Off-road site codes and what they stand for.
const OFFROAD_SITES: &[(&str, &str)] = &[
    ("CPK", "Carpark"),
    ("BCH", "Beach"),
    ("DWY", "Driveway"),
    ("DWAY", "Driveway"),
    ("FCT", "Forecourt"),
];

const ACRONYMS: &[&str] = &["BP", "VTNZ"];

/// Abbreviations keyed by their title-cased form.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Coun", "Countdown"),
    ("C/Down", "Countdown"),
    ("Reserv", "Reserve"),
    ("Stn", "Station"),
    ("Roa", "Road"),
    ("S", "South"),
    ("E", "East"),
    ("W", "West"),
    ("N", "North"),
    ("Riv", "River"),
    ("Br", "Bridge"),
    ("Wbd", "Westbound"),
    ("Ebd", "Eastbound"),
    ("Nbd", "Northbound"),
    ("Sbd", "Southbound"),
    ("Obr", "Overbridge"),
    ("Off", "Off-ramp"),
    ("On", "On-ramp"),
    ("Xing", "Crossing"),
    ("Mckays", "McKays"),
    ("Rly", "Railway"),
    ("Int", "Interchange"),
];

/// Tidies a recorded road name.
///
/// ```
/// use crash_map_dataset::road::format_nice_road;
///
/// assert_eq!(format_nice_road("1/123/4"), "State Highway 1");
/// assert_eq!(format_nice_road("Z Countdown CPK"), "Countdown Carpark (off-roadway)");
/// ```
#[must_use]
pub fn format_nice_road(road: &str) -> String {
    let road = check_offroad(road.trim());
    expand_words(&strip_linear_ref(&road))
}

/// Rewrites off-road locations marked with a standalone `Z`.
///
/// The marker is dropped, the first site code is moved to the end and
/// expanded, and `"(off-roadway)"` is appended. Roads without the marker are
/// returned unchanged.
#[must_use]
pub fn check_offroad(road: &str) -> String {
    let mut words: Vec<&str> = road.split(' ').collect();
    let Some(marker) = words.iter().position(|w| *w == "Z") else {
        return road.to_string();
    };
    words.remove(marker);

    // "Beach Z Piha" reads better as "Piha Beach".
    if words.len() > 1 && words[0] == "Beach" {
        words.rotate_left(1);
    }

    let site = words.iter().enumerate().find_map(|(i, word)| {
        let upper = word.to_ascii_uppercase();
        OFFROAD_SITES
            .iter()
            .find(|(code, _)| *code == upper)
            .map(|(_, name)| (i, *name))
    });
    if let Some((i, name)) = site {
        words.remove(i);
        words.push(name);
        words.push("(off-roadway)");
    }

    words.join(" ")
}

/// Replaces state-highway linear references with `"State Highway N"`.
#[must_use]
pub fn strip_linear_ref(road: &str) -> String {
    if !road.contains('/') || !road.starts_with(|c: char| c.is_ascii_digit()) {
        return road.to_string();
    }

    let highway = |reference: &str| {
        let number = reference.split('/').next().unwrap_or(reference);
        format!("State Highway {number}")
    };

    if let Some((left, right)) = road.split_once(" at ") {
        let right = right.split(" at ").next().unwrap_or(right);
        return [left, right]
            .iter()
            .map(|part| {
                if part.contains('/') {
                    highway(part)
                } else {
                    (*part).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" at ");
    }

    match road.split_once(' ') {
        Some((reference, rest)) => {
            let rest = format!(" {rest} ").replace(" SH ", " State Highway ");
            format!("{} ({})", highway(reference), rest.trim())
        }
        None => highway(road),
    }
}

/// Expands known abbreviations and upper-cases known acronyms, word by
/// word. Brackets around a word are kept.
#[must_use]
pub fn expand_words(road: &str) -> String {
    road.split(' ')
        .map(|word| {
            let left = word.contains('(');
            let right = word.contains(')');
            let bare: String = word.chars().filter(|c| *c != '(' && *c != ')').collect();

            let upper = bare.to_ascii_uppercase();
            let mut expanded = if ACRONYMS.contains(&upper.as_str()) {
                upper
            } else {
                bare
            };
            let titled = title_case(&expanded);
            if let Some((_, full)) = ABBREVIATIONS.iter().find(|(short, _)| *short == titled) {
                expanded = (*full).to_string();
            }

            match (left, right) {
                (true, true) => format!("({expanded})"),
                (true, false) => format!("({expanded}"),
                (false, true) => format!("{expanded})"),
                (false, false) => expanded,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"c/down"` becomes `"C/Down"`.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start = false;
        } else {
            out.push(c);
            start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offroad_marker_is_rewritten() {
        assert_eq!(
            check_offroad("Z Countdown CPK"),
            "Countdown Carpark (off-roadway)"
        );
        assert_eq!(check_offroad("Beach Z Piha"), "Piha Beach");
        assert_eq!(
            check_offroad("Z BCH Muriwai"),
            "Muriwai Beach (off-roadway)"
        );
        assert_eq!(check_offroad("Zion Hill Rd"), "Zion Hill Rd");
    }

    #[test]
    fn highway_references_are_named() {
        assert_eq!(strip_linear_ref("1/123/4"), "State Highway 1");
        assert_eq!(
            strip_linear_ref("1/123/4 at 2/45/6"),
            "State Highway 1 at State Highway 2"
        );
        assert_eq!(
            strip_linear_ref("1/123/4 at Queen St"),
            "State Highway 1 at Queen St"
        );
        assert_eq!(
            strip_linear_ref("2/100/3 near SH 1 junction"),
            "State Highway 2 (near State Highway 1 junction)"
        );
        assert_eq!(strip_linear_ref("Queen St/Victoria St"), "Queen St/Victoria St");
        assert_eq!(strip_linear_ref("Lambton Quay"), "Lambton Quay");
    }

    #[test]
    fn abbreviations_and_acronyms() {
        assert_eq!(expand_words("Waikanae Stn"), "Waikanae Station");
        assert_eq!(expand_words("bp Xing"), "BP Crossing");
        assert_eq!(expand_words("Hutt Riv Br (Wbd)"), "Hutt River Bridge (Westbound)");
        assert_eq!(expand_words("c/down"), "Countdown");
        assert_eq!(expand_words("mckays Rly Xing"), "McKays Railway Crossing");
    }

    #[test]
    fn full_tidy() {
        assert_eq!(
            format_nice_road("1/123/4 at Hutt Rd Obr"),
            "State Highway 1 at Hutt Rd Overbridge"
        );
        assert_eq!(
            format_nice_road(" Z vtnz CPK "),
            "VTNZ Carpark (off-roadway)"
        );
    }
}
