//! Owner-local timestamp rendering.
//!
//! The store keeps every timestamp in UTC; counter records surface feed
//! update times in the owner's preferred timezone, expressed as a fixed
//! offset east of UTC (a preference, not a named zone).

use chrono::{DateTime, FixedOffset, Utc};

/// Wire format for the `updated` field of feed counter records.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The UTC offset, for owners with no timezone preference.
pub fn utc() -> FixedOffset {
    // A zero offset is always representable.
    FixedOffset::east_opt(0).expect("zero UTC offset")
}

/// Converts a preference value in minutes east of UTC into an offset.
///
/// Out-of-range values (beyond +/- 24h, which `chrono` rejects) fall back
/// to UTC rather than failing the assembly over a bad preference row.
pub fn offset_east_minutes(minutes: i32) -> FixedOffset {
    match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
        Some(offset) => offset,
        None => {
            tracing::warn!(minutes, "timezone offset preference out of range, using UTC");
            utc()
        }
    }
}

/// Renders a UTC timestamp in the owner's timezone.
pub fn format_local_datetime(ts: DateTime<Utc>, tz: FixedOffset) -> String {
    ts.with_timezone(&tz).format(DATETIME_FORMAT).to_string()
}
