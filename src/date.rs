//! Calendar helpers: fixed-format ISO parsing, epoch truncation, year-month keys.

use time::macros::format_description;
use time::PrimitiveDateTime;

/// The export writes created dates in exactly this shape; anything else is null.
static CREATED_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse the ISO date-time text of a record. Returns None on any mismatch;
/// a missing calendar timestamp excludes the post from calendar reports only.
pub fn parse_created(s: &str) -> Option<PrimitiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    PrimitiveDateTime::parse(s, CREATED_FORMAT).ok()
}

/// Parse Unix-timestamp text, tolerating fractional-second artifacts
/// ("1700000000.0"), then truncate to whole epoch seconds.
pub fn parse_epoch_seconds(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let f: f64 = s.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    Some(f.trunc() as i64)
}

/// First 7 characters of the cleaned text, expected shape "YYYY-MM".
/// No validation: garbage in, garbage out.
pub fn ym_key(s: &str) -> String {
    s.trim().chars().take(7).collect()
}

/// (year, month 1..=12, hour 0..=23) straight off the stored timestamp.
/// No timezone conversion; the stored value is already in the target zone.
pub fn calendar_fields(dt: PrimitiveDateTime) -> (i32, u8, u8) {
    (dt.year(), dt.month() as u8, dt.hour())
}
