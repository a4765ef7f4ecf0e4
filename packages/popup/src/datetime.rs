//! Local date and time strings for a crash.
//!
//! Timestamps are shown at a fixed offset (UTC+12:00, or UTC+12:45 on the
//! Chatham Islands) rather than through a time-zone database.

use chrono::{DateTime, Datelike as _, FixedOffset};
use crash_map_crash_models::Region;

use crate::words::ordinal_suffix;

/// Converts a Unix timestamp to local time for `region`.
#[must_use]
pub fn local_time(timestamp: i64, region: Region) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(region.utc_offset_seconds())?;
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}

/// Long date, e.g. `"Saturday, 1st March 2014"`.
#[must_use]
pub fn format_date(local: &DateTime<FixedOffset>) -> String {
    format!(
        "{}, {} {}",
        local.format("%A"),
        ordinal_suffix(local.day()),
        local.format("%B %Y")
    )
}

/// 24-hour time, e.g. `"10:30"`.
#[must_use]
pub fn format_time(local: &DateTime<FixedOffset>) -> String {
    local.format("%H:%M").to_string()
}
