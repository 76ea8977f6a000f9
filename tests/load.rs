#[path = "common/mod.rs"]
mod common;

use common::*;
use postetl::PostsEtl;

/// N well-formed rows and 0 malformed rows yield exactly N posts with
/// sequential identifiers 1..N.
#[test]
fn round_trip_sequential_ids() {
    let rows: Vec<String> = (0..5)
        .map(|i| {
            make_row(
                &format!("post {}", i),
                "10",
                "1",
                "1700000000",
                "funny",
                "2023-11-14T22:00:00",
                "2023-11",
                &["word"],
            )
        })
        .collect();
    let path = write_psv(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    assert_eq!(ds.posts.len(), 5);
    let ids: Vec<u64> = ds.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(ds.load_stats.rows_read, 5);
    assert_eq!(ds.load_stats.rows_kept, 5);
    assert_eq!(ds.load_stats.rows_skipped, 0);
}

/// Quote characters are stripped before any typed consumption: "15000" parses
/// as the integer 15000, community loses its wrapping quotes.
#[test]
fn quote_stripping() {
    let rows = vec![make_row(
        "a \"quoted\" title",
        "15000",
        "500",
        "1700000000",
        "funny",
        "2023-11-14T22:00:00",
        "2023-11",
        &["a"],
    )];
    let path = write_psv(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    let p = &ds.posts[0];
    assert_eq!(p.community, "funny");
    assert_eq!(p.score, Some(15000));
    assert_eq!(p.title, "a quoted title");
}

/// Rows with the wrong column count are skipped and enumerated in the error
/// artifact as `row_number<TAB>reason`.
#[test]
fn malformed_rows_skipped_and_logged() {
    let good = make_row(
        "fine",
        "1",
        "1",
        "1700000000",
        "funny",
        "2023-11-14T22:00:00",
        "2023-11",
        &["fine"],
    );
    let rows = vec![good.clone(), "only|three|fields".to_string(), good];
    let path = write_psv(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    assert_eq!(ds.posts.len(), 2);
    assert_eq!(ds.load_stats.rows_skipped, 1);
    // ids stay gapless even though a middle row dropped out
    assert_eq!(ds.posts[1].id, 2);

    let log = ds.load_stats.error_log.clone().unwrap();
    let lines = read_lines(&log);
    assert_eq!(lines.len(), 1);
    // the malformed row sits on physical line 3 (header is line 1)
    assert_eq!(lines[0], "3\texpected 9 fields, found 3");
}

/// Exceeding the configured error ceiling aborts the whole load.
#[test]
fn abort_when_error_ceiling_exceeded() {
    let rows = vec![
        "bad".to_string(),
        "also|bad".to_string(),
        "still|not|nine|fields".to_string(),
    ];
    let path = write_psv(&rows);

    let err = PostsEtl::new()
        .progress(false)
        .max_load_errors(1)
        .load(&path)
        .unwrap_err();
    assert!(err.to_string().contains("exceeds the configured maximum"));
}

/// `.zst` inputs are decoded transparently.
#[test]
fn zstd_input() {
    let rows = vec![make_row(
        "compressed",
        "7",
        "0",
        "1700000000",
        "funny",
        "2023-11-14T22:00:00",
        "2023-11",
        &["compressed"],
    )];
    let path = write_psv_zst(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    assert_eq!(ds.posts.len(), 1);
    assert_eq!(ds.posts[0].score, Some(7));
}

/// Empty data lines are ignored rather than counted as malformed.
#[test]
fn blank_lines_ignored() {
    let good = make_row(
        "fine",
        "1",
        "1",
        "1700000000",
        "funny",
        "2023-11-14T22:00:00",
        "2023-11",
        &["fine"],
    );
    let rows = vec![good, String::new()];
    let path = write_psv(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    assert_eq!(ds.posts.len(), 1);
    assert_eq!(ds.load_stats.rows_skipped, 0);
}
