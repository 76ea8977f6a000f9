//! Median-by-hour reports and the combined report battery.
//!
//! The reports are independent reads over immutable data, so the battery runs
//! them on rayon; only the top-word materialization writes anywhere, behind
//! the store's own lock.

use crate::bucketing::{bucket_crosstab, CommentsBucket, ScoreBucket};
use crate::counting::{posts_per_year, yearly_averages, YearlyAverages};
use crate::normalize::Post;
use crate::tokens::Token;
use crate::topwords::{top_words, TopWordResult, TopWordStore, TOP_WORDS_LIMIT};
use serde::Serialize;
use std::collections::BTreeMap;

/// Linear-interpolated percentile over an ascending-sorted slice.
/// For n values and quantile q: idx = q * (n - 1),
/// result = v[floor(idx)] + frac(idx) * (v[ceil(idx)] - v[floor(idx)]).
/// Empty input has no defined percentile.
pub fn percentile_linear(sorted: &[i64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    let lo_v = sorted[lo] as f64;
    let hi_v = sorted[hi] as f64;
    Some(lo_v + (idx - lo as f64) * (hi_v - lo_v))
}

/// Median (50th percentile, interpolated) score per (community, hour_utc).
/// Posts without a derived hour or with a null score are excluded; empty
/// partitions emit no entry.
pub fn median_score_by_hour(posts: &[Post]) -> BTreeMap<(String, u8), f64> {
    let mut partitions: BTreeMap<(String, u8), Vec<i64>> = BTreeMap::new();
    for p in posts {
        if let (Some(hour), Some(score)) = (p.hour_utc, p.score) {
            partitions
                .entry((p.community.clone(), hour))
                .or_default()
                .push(score);
        }
    }
    partitions
        .into_iter()
        .filter_map(|(key, mut scores)| {
            scores.sort_unstable();
            percentile_linear(&scores, 0.5).map(|median| (key, median))
        })
        .collect()
}

/// One pivoted row: a community and its 24 hourly median cells, `None` where
/// the (community, hour) partition is empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MedianHourRow {
    pub community: String,
    pub hours: [Option<f64>; 24],
}

/// Reshape the per-(community, hour) medians into one row per community.
/// Derived from `median_score_by_hour` output rather than recomputed, so the
/// two views can never disagree.
pub fn median_hour_pivot(medians: &BTreeMap<(String, u8), f64>) -> Vec<MedianHourRow> {
    let mut rows: BTreeMap<&str, [Option<f64>; 24]> = BTreeMap::new();
    for ((community, hour), median) in medians {
        let cells = rows.entry(community.as_str()).or_insert([None; 24]);
        if let Some(cell) = cells.get_mut(*hour as usize) {
            *cell = Some(*median);
        }
    }
    rows.into_iter()
        .map(|(community, hours)| MedianHourRow { community: community.to_string(), hours })
        .collect()
}

/// The fixed report battery over one loaded dataset.
#[derive(Clone, Debug)]
pub struct ReportBundle {
    pub posts_per_year: BTreeMap<(i32, String), u64>,
    pub yearly_averages: Vec<YearlyAverages>,
    pub median_by_hour: BTreeMap<(String, u8), f64>,
    pub median_pivot: Vec<MedianHourRow>,
    pub top_words: Vec<TopWordResult>,
    pub bucket_crosstab: BTreeMap<(String, ScoreBucket, CommentsBucket), u64>,
}

impl ReportBundle {
    /// Run every report. The reports only read `posts`/`tokens`, so they run
    /// concurrently; the top-word rows are additionally materialized into
    /// `store` (full replace) after that computation finishes.
    pub fn compute(posts: &[Post], tokens: &[Token], store: &TopWordStore) -> Self {
        let ((counts, averages), (medians, (words, crosstab))) = rayon::join(
            || rayon::join(|| posts_per_year(posts), || yearly_averages(posts)),
            || {
                rayon::join(
                    || median_score_by_hour(posts),
                    || {
                        rayon::join(
                            || top_words(posts, tokens, TOP_WORDS_LIMIT),
                            || bucket_crosstab(posts),
                        )
                    },
                )
            },
        );
        let pivot = median_hour_pivot(&medians);
        store.replace_all(words.clone());
        Self {
            posts_per_year: counts,
            yearly_averages: averages,
            median_by_hour: medians,
            median_pivot: pivot,
            top_words: words,
            bucket_crosstab: crosstab,
        }
    }
}
