//! Spelled-out numbers and small English grammar helpers.

const CARDINALS: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const ORDINALS: [&str; 20] = [
    "zeroth",
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spelled-out cardinal for 0-99, e.g. `"forty-two"`.
#[must_use]
pub fn cardinal_words(n: u32) -> Option<String> {
    match n {
        0..=19 => Some(CARDINALS[n as usize].to_string()),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            Some(match n % 10 {
                0 => tens.to_string(),
                unit => format!("{tens}-{}", CARDINALS[unit as usize]),
            })
        }
        _ => None,
    }
}

/// Spelled-out ordinal, e.g. `"twenty-first"`.
///
/// Covers 0-99; larger numbers fall back to [`ordinal_suffix`].
#[must_use]
pub fn ordinal_words(n: u32) -> String {
    match n {
        0..=19 => ORDINALS[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                // twenty -> twentieth
                0 => format!("{}ieth", tens.trim_end_matches('y')),
                unit => format!("{tens}-{}", ORDINALS[unit as usize]),
            }
        }
        _ => ordinal_suffix(n),
    }
}

/// Number with its ordinal suffix, e.g. `"1st"`, `"12th"`, `"23rd"`.
#[must_use]
pub fn ordinal_suffix(n: u32) -> String {
    let suffix = if (4..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

/// `"a"` or `"an"` for a number written in digits, chosen by how the number
/// is spoken: "an 8", "an 11", "an 18", "an 80", but "a 1", "a 7".
#[must_use]
pub fn indefinite_article(n: u32) -> &'static str {
    let spoken = if n < 100 {
        cardinal_words(n)
    } else {
        // "eight hundred ...", "one thousand ..."; only the leading digit
        // decides the first sound.
        let mut lead = n;
        while lead >= 10 {
            lead /= 10;
        }
        cardinal_words(lead)
    };

    match spoken {
        Some(word) if word.starts_with("eight") || word.starts_with("eleven") => "an",
        _ => "a",
    }
}

/// Picks the singular or plural form for `count`.
#[must_use]
pub const fn grammar<'a>(singular: &'a str, plural: &'a str, count: u32) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Upper-cases the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
