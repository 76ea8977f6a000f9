//! Typed normalization: `RawRecord` -> `Post`.
//!
//! Conversion failures never abort the run. A field that fails its parse is
//! nulled and the record is retained; downstream aggregates exclude nulls
//! rather than coerce them to zero.

use crate::date::{parse_created, parse_epoch_seconds, ym_key};
use crate::loader::RawRecord;
use serde::Serialize;
use time::PrimitiveDateTime;

/// The canonical typed post. Created once from a `RawRecord`, read-only for
/// all downstream aggregation. Calendar-derived fields (`year`, `month`,
/// `hour_utc`) are filled by the field deriver and are present if and only if
/// `created` parsed.
#[derive(Clone, Debug, Serialize)]
pub struct Post {
    pub id: u64,
    pub community: String,
    pub title: String,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<i64>,
    #[serde(skip)]
    pub created: Option<PrimitiveDateTime>,
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub hour_utc: Option<u8>,
    pub year_month: String,
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Normalize one record into a post with the given sequential id.
pub fn normalize_one(raw: &RawRecord, id: u64) -> Post {
    Post {
        id,
        community: raw.community.trim().to_string(),
        title: raw.title.clone(),
        score: parse_int(&raw.score),
        num_comments: parse_int(&raw.num_comments),
        created_utc: parse_epoch_seconds(&raw.created_timestamp),
        created: parse_created(&raw.created_date),
        year: None,
        month: None,
        hour_utc: None,
        year_month: ym_key(&raw.year_month),
    }
}

/// Normalize all records in input order. Ids are assigned sequentially
/// starting at 1 with no gaps; the counter is scoped to this call, never a
/// process-wide singleton.
pub fn normalize_all(raws: &[RawRecord]) -> Vec<Post> {
    let mut next_id = 1u64;
    let mut posts = Vec::with_capacity(raws.len());
    for raw in raws {
        posts.push(normalize_one(raw, next_id));
        next_id += 1;
    }
    let nulled_scores = posts.iter().filter(|p| p.score.is_none()).count();
    let nulled_dates = posts.iter().filter(|p| p.created.is_none()).count();
    if nulled_scores > 0 || nulled_dates > 0 {
        tracing::debug!(
            nulled_scores,
            nulled_dates,
            "normalization nulled unconvertible fields"
        );
    }
    posts
}
