//! Staged ingestion: pipe-delimited posts export -> untyped `RawRecord` rows.
//! Malformed rows are logged to an error artifact and counted toward an abort
//! ceiling; everything else is deferred to the normalizer.

use crate::config::LoadOptions;
use crate::progress::{file_size, make_progress_bar_labeled};
use crate::util::{create_with_backoff, open_with_backoff, strip_outer_quotes, strip_quotes};
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use zstd::stream::read::Decoder;

/// Field order of the posts export. One row per post, all fields text.
pub const EXPECTED_FIELDS: usize = 9;

/// One input row, untouched except for quote stripping. Discarded after
/// normalization.
#[derive(Clone, Debug)]
pub struct RawRecord {
    pub title: String,
    pub score: String,
    pub num_comments: String,
    pub created_timestamp: String,
    pub community: String,
    pub created_date: String,
    pub year_month: String,
    pub tokens_text: String,
    pub tokens_json: String,
}

/// Row-level accounting for a single load run.
#[derive(Clone, Debug, Default)]
pub struct LoadStats {
    pub rows_read: u64,
    pub rows_kept: u64,
    pub rows_skipped: u64,
    pub error_log: Option<PathBuf>,
}

/// A `Read` wrapper that counts raw bytes read, for byte-accurate progress
/// even when the input is zstd-compressed.
struct CountingReader<R: Read> {
    inner: R,
    counter: Arc<AtomicU64>,
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

fn open_reader(
    path: &Path,
    read_buf_bytes: usize,
    counter: Arc<AtomicU64>,
) -> Result<Box<dyn BufRead>> {
    let file = open_with_backoff(path, 16, 50).with_context(|| format!("open {}", path.display()))?;
    let counting = CountingReader { inner: file, counter };
    let is_zst = path.extension().and_then(|e| e.to_str()) == Some("zst");
    if is_zst {
        let mut decoder = Decoder::new(counting)?;
        decoder.window_log_max(31)?;
        Ok(Box::new(BufReader::with_capacity(read_buf_bytes, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(read_buf_bytes, counting)))
    }
}

fn default_error_log(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input")
        .to_string();
    name.push_str(".errors.tsv");
    input.with_file_name(name)
}

/// Read a pipe-delimited export with a header row into raw records.
///
/// - The header row is skipped.
/// - Literal quote characters are stripped from every scalar field; the JSON
///   token payload keeps its interior quotes.
/// - Rows with the wrong column count are skipped and appended to the error
///   artifact as `row_number<TAB>reason`; once the skip count exceeds
///   `opts.max_load_errors` the whole load aborts.
pub fn read_raw(path: &Path, opts: &LoadOptions) -> Result<(Vec<RawRecord>, LoadStats)> {
    let delim = opts.delimiter as char;
    let counter = Arc::new(AtomicU64::new(0));
    let mut reader = open_reader(path, opts.read_buffer_bytes, counter.clone())?;

    let err_path = opts.error_log.clone().unwrap_or_else(|| default_error_log(path));
    let err_file = create_with_backoff(&err_path, 16, 50)
        .with_context(|| format!("create error log {}", err_path.display()))?;
    let mut err_w = BufWriter::with_capacity(opts.write_buffer_bytes, err_file);

    let pb = if opts.progress {
        Some(make_progress_bar_labeled(file_size(path), opts.progress_label.as_deref()))
    } else {
        None
    };

    let mut records = Vec::new();
    let mut stats = LoadStats { error_log: Some(err_path.clone()), ..Default::default() };

    let mut buf = String::with_capacity(16 * 1024);
    let mut line_no: u64 = 0; // physical line number; the header is line 1
    let mut last_bytes = 0u64;
    loop {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            break;
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        if let Some(pb) = &pb {
            let cur = counter.load(Ordering::Relaxed);
            if cur > last_bytes {
                pb.inc(cur - last_bytes);
                last_bytes = cur;
            }
        }
        line_no += 1;
        if line_no == 1 {
            continue; // header row
        }
        if buf.is_empty() {
            continue;
        }
        stats.rows_read += 1;

        let fields: Vec<&str> = buf.split(delim).collect();
        if fields.len() != EXPECTED_FIELDS {
            stats.rows_skipped += 1;
            writeln!(
                err_w,
                "{}\texpected {} fields, found {}",
                line_no,
                EXPECTED_FIELDS,
                fields.len()
            )?;
            if stats.rows_skipped > opts.max_load_errors {
                err_w.flush()?;
                if let Some(pb) = &pb {
                    pb.abandon_with_message("load aborted");
                }
                bail!(
                    "aborting load of {}: {} malformed rows exceeds the configured maximum of {} (see {})",
                    path.display(),
                    stats.rows_skipped,
                    opts.max_load_errors,
                    err_path.display()
                );
            }
            continue;
        }

        records.push(RawRecord {
            title: strip_quotes(fields[0]),
            score: strip_quotes(fields[1]),
            num_comments: strip_quotes(fields[2]),
            created_timestamp: strip_quotes(fields[3]),
            community: strip_quotes(fields[4]),
            created_date: strip_quotes(fields[5]),
            year_month: strip_quotes(fields[6]),
            tokens_text: strip_quotes(fields[7]),
            // The token payload is itself JSON; only the wrapping quotes go.
            tokens_json: strip_outer_quotes(fields[8]),
        });
        stats.rows_kept += 1;
    }

    err_w.flush()?;
    if let Some(pb) = pb {
        pb.finish_with_message("load done");
    }
    if stats.rows_skipped > 0 {
        tracing::warn!(
            skipped = stats.rows_skipped,
            log = %err_path.display(),
            "some rows were rejected during load"
        );
    }
    tracing::info!(read = stats.rows_read, kept = stats.rows_kept, "load complete");
    Ok((records, stats))
}
