//! Top tokens per community: ranking, the materialized result store, and TSV
//! export.

use crate::normalize::Post;
use crate::tokens::Token;
use crate::util::{create_with_backoff, replace_file_atomic_backoff};
use ahash::AHashMap;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Per-community ranking depth of the materialized report.
pub const TOP_WORDS_LIMIT: usize = 15;

/// One ranked row: how often `token` appears across a community's posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopWordResult {
    pub community: String,
    pub token: String,
    pub frequency: u64,
}

/// Token frequencies grouped by (community, token), ranked descending by
/// frequency within each community, ties broken by token lexical order, cut
/// to `limit` rows per community. Output is ordered by community, then rank.
pub fn top_words(posts: &[Post], tokens: &[Token], limit: usize) -> Vec<TopWordResult> {
    let mut community_of: AHashMap<u64, &str> = AHashMap::with_capacity(posts.len());
    for p in posts {
        community_of.insert(p.id, p.community.as_str());
    }

    let mut freq: AHashMap<(&str, &str), u64> = AHashMap::new();
    for t in tokens {
        if let Some(&community) = community_of.get(&t.post_id) {
            *freq.entry((community, t.token.as_str())).or_insert(0) += 1;
        }
    }

    // Regroup per community for ranking; BTreeMap keeps community order stable.
    let mut per_community: BTreeMap<&str, Vec<(&str, u64)>> = BTreeMap::new();
    for ((community, token), n) in freq {
        per_community.entry(community).or_default().push((token, n));
    }

    let mut out = Vec::new();
    for (community, mut rows) in per_community {
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows.truncate(limit);
        out.extend(rows.into_iter().map(|(token, frequency)| TopWordResult {
            community: community.to_string(),
            token: token.to_string(),
            frequency,
        }));
    }
    out
}

/// Materialized store for the top-word report. Each aggregation run replaces
/// the contents wholesale; the single-writer lock serializes that replace
/// against concurrent report runs.
#[derive(Default)]
pub struct TopWordStore {
    rows: Mutex<Vec<TopWordResult>>,
}

impl TopWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full replace, not an incremental merge.
    pub fn replace_all(&self, rows: Vec<TopWordResult>) {
        let mut guard = self.rows.lock();
        *guard = rows;
    }

    pub fn snapshot(&self) -> Vec<TopWordResult> {
        self.rows.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// Export as `community<TAB>token<TAB>frequency`, already sorted by
    /// (community, frequency desc, token). Written to a temp file first and
    /// promoted atomically.
    pub fn export_tsv(&self, out_path: &Path, write_buf_bytes: usize) -> Result<()> {
        let rows = self.snapshot();
        let tmp_path = out_path.with_extension("tsv.tmp");
        {
            let file = create_with_backoff(&tmp_path, 16, 50)
                .with_context(|| format!("create {}", tmp_path.display()))?;
            let mut w = BufWriter::with_capacity(write_buf_bytes, file);
            for row in &rows {
                writeln!(w, "{}\t{}\t{}", row.community, row.token, row.frequency)?;
            }
            w.flush()?;
        }
        replace_file_atomic_backoff(&tmp_path, out_path)?;
        tracing::info!(rows = rows.len(), path = %out_path.display(), "top-word export written");
        Ok(())
    }
}
