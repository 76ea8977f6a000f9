use crate::aggregate::ReportBundle;
use crate::config::LoadOptions;
use crate::derive::derive_calendar_fields;
use crate::loader::{read_raw, LoadStats};
use crate::normalize::{normalize_all, Post};
use crate::tokens::{explode_all, Token};
use crate::topwords::TopWordStore;
use crate::util::init_tracing_once;
use anyhow::Result;
use std::path::Path;

/// Entry point for one batch run: configure, load, report.
#[derive(Clone)]
pub struct PostsEtl {
    pub(crate) opts: LoadOptions,
}

impl Default for PostsEtl {
    fn default() -> Self {
        Self::new()
    }
}

impl PostsEtl {
    pub fn new() -> Self {
        Self { opts: LoadOptions::default() }
    }

    // -------- Builder methods --------
    pub fn delimiter(mut self, delim: u8) -> Self { self.opts = self.opts.with_delimiter(delim); self }
    pub fn max_load_errors(mut self, n: u64) -> Self { self.opts = self.opts.with_max_load_errors(n); self }
    pub fn error_log(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_error_log(path); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    /// Run the forward pipeline: load -> normalize -> derive -> expand tokens.
    /// Raw records are dropped once normalization has consumed them.
    pub fn load(self, path: impl AsRef<Path>) -> Result<Dataset> {
        init_tracing_once();
        let path = path.as_ref();

        let (raws, load_stats) = read_raw(path, &self.opts)?;
        let mut posts = normalize_all(&raws);
        derive_calendar_fields(&mut posts);
        let payloads: Vec<String> = raws.into_iter().map(|r| r.tokens_json).collect();
        let tokens = explode_all(&posts, &payloads);

        tracing::info!(
            posts = posts.len(),
            tokens = tokens.len(),
            "pipeline complete"
        );
        Ok(Dataset {
            posts,
            tokens,
            load_stats,
            write_buffer_bytes: self.opts.write_buffer_bytes,
        })
    }
}

/// The immutable output of one load run: the typed post table, the expanded
/// token table, and the load accounting. All report operations are read-only
/// views over this.
#[derive(Debug)]
pub struct Dataset {
    pub posts: Vec<Post>,
    pub tokens: Vec<Token>,
    pub load_stats: LoadStats,
    write_buffer_bytes: usize,
}

impl Dataset {
    /// Run the full report battery, materializing top words into `store`.
    pub fn run_reports(&self, store: &TopWordStore) -> ReportBundle {
        ReportBundle::compute(&self.posts, &self.tokens, store)
    }

    /// Convenience: run the battery with a fresh store and export the
    /// materialized top-word rows as TSV.
    pub fn run_reports_with_export(&self, top_words_out: &Path) -> Result<ReportBundle> {
        let store = TopWordStore::new();
        let bundle = self.run_reports(&store);
        store.export_tsv(top_words_out, self.write_buffer_bytes)?;
        Ok(bundle)
    }
}
