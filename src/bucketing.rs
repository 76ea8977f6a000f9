//! Discrete range labels for score and comment counts, and the
//! per-community bucket cross-tab.

use crate::normalize::Post;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Score tier: low < 10_000 <= mid < 100_000 <= high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Low,
    Mid,
    High,
}

impl ScoreBucket {
    pub fn of(score: i64) -> Self {
        if score < 10_000 {
            Self::Low
        } else if score < 100_000 {
            Self::Mid
        } else {
            Self::High
        }
    }
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        })
    }
}

/// Comment-count tier: low < 1_000 <= mid < 5_000 <= high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentsBucket {
    Low,
    Mid,
    High,
}

impl CommentsBucket {
    pub fn of(comments: i64) -> Self {
        if comments < 1_000 {
            Self::Low
        } else if comments < 5_000 {
            Self::Mid
        } else {
            Self::High
        }
    }
}

impl fmt::Display for CommentsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        })
    }
}

/// Count of posts grouped by (community, score bucket, comments bucket).
/// Buckets partition the numeric ranges exhaustively and disjointly, so every
/// post with both fields present lands in exactly one cell; posts with a null
/// score or comment count are excluded rather than coerced to zero.
pub fn bucket_crosstab(
    posts: &[Post],
) -> BTreeMap<(String, ScoreBucket, CommentsBucket), u64> {
    let mut m = BTreeMap::new();
    for p in posts {
        if let (Some(score), Some(comments)) = (p.score, p.num_comments) {
            let key = (
                p.community.clone(),
                ScoreBucket::of(score),
                CommentsBucket::of(comments),
            );
            *m.entry(key).or_insert(0u64) += 1;
        }
    }
    m
}
