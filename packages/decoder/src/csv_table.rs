//! CSV decoder tables.
//!
//! The first row is a header. Only `code` and `title` are required; the
//! remaining columns (`icon`, `icon_day`, `icon_night`, `category`,
//! `requires_subject`) may be omitted or left blank. The spreadsheet
//! column names `Pretty`, `Category` and `Requires Subject` are accepted
//! as well.

use crash_map_decoder_models::{DecoderRecord, DecoderTable};
use serde::Deserialize;

use crate::DecoderError;

#[derive(Debug, Deserialize)]
struct CsvRow {
    code: String,
    #[serde(alias = "Pretty", alias = "pretty")]
    title: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    icon_day: Option<String>,
    #[serde(default)]
    icon_night: Option<String>,
    #[serde(default, alias = "Category")]
    category: Option<String>,
    #[serde(default, alias = "Requires Subject")]
    requires_subject: Option<String>,
}

impl From<CsvRow> for DecoderRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row.title.trim().to_string(),
            icon: non_blank(row.icon),
            icon_day: non_blank(row.icon_day),
            icon_night: non_blank(row.icon_night),
            category: non_blank(row.category),
            requires_subject: row
                .requires_subject
                .as_deref()
                .and_then(parse_yes_no),
        }
    }
}

/// Parses a CSV decoder table.
///
/// Rows with a blank code are skipped.
///
/// # Errors
///
/// Returns [`DecoderError::Csv`] if a row cannot be read or lacks a
/// required column.
pub fn parse_csv(text: &str) -> Result<DecoderTable, DecoderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let code = row.code.trim().to_string();
        if code.is_empty() {
            continue;
        }
        entries.push((code, DecoderRecord::from(row)));
    }

    Ok(entries.into_iter().collect())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_columns() {
        let table = parse_csv("code,title\nC,car\nV,van/ute\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("V").unwrap().title, "van/ute");
        assert_eq!(table.get("C").unwrap().icon, None);
    }

    #[test]
    fn parses_spreadsheet_columns() {
        let text = "code,Category,Requires Subject,Pretty\n\
                    130,Driver control,TRUE,lost control\n\
                    801,Road,FALSE,The road was slippery\n\
                    ,Road,FALSE,orphan row\n";
        let table = parse_csv(text).unwrap();

        assert_eq!(table.len(), 2);
        let slippery = table.get("801").unwrap();
        assert_eq!(slippery.category.as_deref(), Some("Road"));
        assert_eq!(slippery.requires_subject, Some(false));
        assert!(table.get("130").unwrap().needs_subject());
    }

    #[test]
    fn blank_icons_are_absent() {
        let table = parse_csv("code,title,icon,icon_day,icon_night\nF,Fine,, sun.svg ,moon.svg\n")
            .unwrap();
        let fine = table.get("F").unwrap();
        assert_eq!(fine.icon, None);
        assert_eq!(fine.icon_for(true), Some("sun.svg"));
        assert_eq!(fine.icon_for(false), Some("moon.svg"));
    }

    #[test]
    fn missing_title_column_is_an_error() {
        assert!(matches!(
            parse_csv("code,icon\nC,car.svg\n"),
            Err(DecoderError::Csv(_))
        ));
    }
}
