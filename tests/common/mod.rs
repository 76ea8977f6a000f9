#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str =
    "title|score|num_comments|created_timestamp|subreddit|created_date|year_month|tokens_text|tokens_json";

/// Quote a field the way the export does.
pub fn q(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Build one well-formed data row. Every scalar field is quoted; the JSON
/// token payload is written bare.
pub fn make_row(
    title: &str,
    score: &str,
    comments: &str,
    ts: &str,
    community: &str,
    date: &str,
    ym: &str,
    tokens: &[&str],
) -> String {
    let tokens_text = tokens.join(" ");
    let tokens_json = serde_json::to_string(tokens).unwrap();
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}",
        q(title),
        q(score),
        q(comments),
        q(ts),
        q(community),
        q(date),
        q(ym),
        q(&tokens_text),
        tokens_json
    )
}

/// Write a plain posts export (header + rows) into a fresh temp dir and
/// return its path. The temp dir is leaked for the duration of the test.
pub fn write_psv(rows: &[String]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap().into_path();
    let path = dir.join("posts.psv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "{}", HEADER).unwrap();
    for r in rows {
        writeln!(f, "{}", r).unwrap();
    }
    path
}

/// Same corpus, zstd-compressed, mirroring the monthly-dump layout.
pub fn write_psv_zst(rows: &[String]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap().into_path();
    let path = dir.join("posts.psv.zst");
    let f = File::create(&path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    writeln!(enc, "{}", HEADER).unwrap();
    for r in rows {
        writeln!(enc, "{}", r).unwrap();
    }
    enc.finish().unwrap();
    path
}

/// Read a text file line-by-line into strings (useful for .tsv artifacts).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

/// A small mixed corpus: two communities, two years, clean rows only.
pub fn make_corpus_basic() -> PathBuf {
    let rows = vec![
        make_row(
            "great post",
            "15000",
            "500",
            "1700000000",
            "funny",
            "2023-11-14T22:00:00",
            "2023-11",
            &["great", "post"],
        ),
        make_row(
            "ok post",
            "12",
            "3",
            "1700003600",
            "funny",
            "2023-11-14T23:00:00",
            "2023-11",
            &["ok", "post"],
        ),
        make_row(
            "old news",
            "250000",
            "9000",
            "1600000000",
            "news",
            "2020-09-13T12:26:40",
            "2020-09",
            &["old", "news", "news"],
        ),
    ];
    write_psv(&rows)
}

pub fn rm_quiet(path: &Path) {
    let _ = fs::remove_file(path);
}
