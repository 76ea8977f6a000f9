//! Field deriver: calendar fields off the parsed timestamp.

use crate::date::calendar_fields;
use crate::normalize::Post;

/// Fill `year`, `month`, `hour_utc` for every post whose calendar timestamp
/// parsed. Posts without one keep all three as None and drop out of the
/// calendar-keyed reports; they stay visible to token/community reports.
///
/// No timezone conversion happens here: the stored timestamp is treated as
/// already being in the target zone (UTC for this export).
pub fn derive_calendar_fields(posts: &mut [Post]) {
    for post in posts.iter_mut() {
        if let Some(dt) = post.created {
            let (year, month, hour) = calendar_fields(dt);
            post.year = Some(year);
            post.month = Some(month);
            post.hour_utc = Some(hour);
        }
    }
}
