//! Small reducers: per-(year, community) post counts and arithmetic means.

use crate::normalize::Post;
use serde::Serialize;
use std::collections::BTreeMap;

/// Count posts grouped by (year, community). Posts without a derived year are
/// excluded (their calendar timestamp never parsed).
pub fn posts_per_year(posts: &[Post]) -> BTreeMap<(i32, String), u64> {
    let mut m = BTreeMap::new();
    for p in posts {
        if let Some(year) = p.year {
            *m.entry((year, p.community.clone())).or_insert(0u64) += 1;
        }
    }
    m
}

/// Mean score and mean comment count for one (year, community) group.
/// A null field is excluded from its mean, never coerced to zero; a mean over
/// zero non-null values is `None`. Groups with zero posts emit no row at all.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YearlyAverages {
    pub year: i32,
    pub community: String,
    pub posts: u64,
    pub avg_score: Option<f64>,
    pub avg_comments: Option<f64>,
}

#[derive(Default)]
struct MeanAcc {
    posts: u64,
    score_sum: i64,
    score_n: u64,
    comments_sum: i64,
    comments_n: u64,
}

/// Average score/comments grouped by (year, community), ordered by key.
pub fn yearly_averages(posts: &[Post]) -> Vec<YearlyAverages> {
    let mut m: BTreeMap<(i32, String), MeanAcc> = BTreeMap::new();
    for p in posts {
        let year = match p.year {
            Some(y) => y,
            None => continue,
        };
        let acc = m.entry((year, p.community.clone())).or_default();
        acc.posts += 1;
        if let Some(s) = p.score {
            acc.score_sum += s;
            acc.score_n += 1;
        }
        if let Some(c) = p.num_comments {
            acc.comments_sum += c;
            acc.comments_n += 1;
        }
    }
    m.into_iter()
        .map(|((year, community), acc)| YearlyAverages {
            year,
            community,
            posts: acc.posts,
            avg_score: (acc.score_n > 0).then(|| acc.score_sum as f64 / acc.score_n as f64),
            avg_comments: (acc.comments_n > 0)
                .then(|| acc.comments_sum as f64 / acc.comments_n as f64),
        })
        .collect()
}
