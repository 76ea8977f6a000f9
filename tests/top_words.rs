#[path = "common/mod.rs"]
mod common;

use common::*;
use postetl::{PostsEtl, TopWordResult, TopWordStore, TOP_WORDS_LIMIT};

fn token_row(community: &str, tokens: &[&str]) -> String {
    make_row(
        "post",
        "1",
        "1",
        "1700000000",
        community,
        "2023-11-14T22:00:00",
        "2023-11",
        tokens,
    )
}

/// Never more than 15 rows per community; frequencies non-increasing within a
/// community; ties broken by token lexical order.
#[test]
fn top_words_ranking() {
    // 20 distinct tokens in "funny": t00 appears 20 times, t01 19 times, ...
    let mut rows = Vec::new();
    for i in 0..20usize {
        let tok = format!("t{:02}", i);
        for _ in 0..(20 - i) {
            rows.push(token_row("funny", &[tok.as_str()]));
        }
    }
    // a tie in "news": both words appear twice, "apple" must rank first
    rows.push(token_row("news", &["zebra", "apple"]));
    rows.push(token_row("news", &["apple", "zebra"]));
    let path = write_psv(&rows);

    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    let store = TopWordStore::new();
    let bundle = ds.run_reports(&store);

    let funny: Vec<&TopWordResult> = bundle
        .top_words
        .iter()
        .filter(|r| r.community == "funny")
        .collect();
    assert_eq!(funny.len(), TOP_WORDS_LIMIT);
    assert!(funny.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    assert_eq!(funny[0].token, "t00");
    assert_eq!(funny[0].frequency, 20);
    // t15..t19 fell off the cut
    assert!(funny.iter().all(|r| r.token < "t15".to_string()));

    let news: Vec<&TopWordResult> = bundle
        .top_words
        .iter()
        .filter(|r| r.community == "news")
        .collect();
    assert_eq!(news.len(), 2);
    assert_eq!(news[0].token, "apple");
    assert_eq!(news[1].token, "zebra");
    assert_eq!(news[0].frequency, 2);
}

/// Materialization is a full replace: a second run discards the first run's
/// rows entirely.
#[test]
fn store_replace_semantics() {
    let store = TopWordStore::new();
    store.replace_all(vec![TopWordResult {
        community: "stale".into(),
        token: "old".into(),
        frequency: 99,
    }]);
    assert_eq!(store.len(), 1);

    let path = write_psv(&[token_row("funny", &["fresh"])]);
    let ds = PostsEtl::new().progress(false).load(&path).unwrap();
    ds.run_reports(&store);

    let rows = store.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].community, "funny");
    assert_eq!(rows[0].token, "fresh");
    assert_eq!(rows[0].frequency, 1);
}

/// The export artifact is community<TAB>token<TAB>frequency, communities in
/// order, frequency descending within a community.
#[test]
fn tsv_export() {
    let rows = vec![
        token_row("funny", &["ha", "ha", "heh"]),
        token_row("news", &["grim"]),
    ];
    let path = write_psv(&rows);
    let ds = PostsEtl::new().progress(false).load(&path).unwrap();

    let out = path.with_file_name("top_words.tsv");
    ds.run_reports_with_export(&out).unwrap();

    let lines = read_lines(&out);
    assert_eq!(
        lines,
        vec![
            "funny\tha\t2".to_string(),
            "funny\theh\t1".to_string(),
            "news\tgrim\t1".to_string(),
        ]
    );
}
