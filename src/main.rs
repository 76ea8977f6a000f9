use anyhow::Result;
use postetl::PostsEtl;
use std::path::PathBuf;

const DATA_FILE: &str = "./data/posts.psv";
const TOP_WORDS_OUT: &str = "./top_words.tsv";

fn main() -> Result<()> {
    let input = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DATA_FILE));

    let dataset = PostsEtl::new()
        .max_load_errors(100)
        .progress(true)
        .progress_label("Loading posts")
        .load(&input)?;

    println!(
        "Loaded {} posts ({} rows skipped), {} tokens",
        dataset.posts.len(),
        dataset.load_stats.rows_skipped,
        dataset.tokens.len()
    );

    let bundle = dataset.run_reports_with_export(&PathBuf::from(TOP_WORDS_OUT))?;

    println!("\nPosts per year per community:");
    for ((year, community), n) in &bundle.posts_per_year {
        println!("  {} {:<24} {}", year, community, n);
    }

    println!("\nYearly averages:");
    for row in &bundle.yearly_averages {
        println!(
            "  {} {:<24} posts={} avg_score={:?} avg_comments={:?}",
            row.year, row.community, row.posts, row.avg_score, row.avg_comments
        );
    }

    println!("\nMedian score by hour (pivot):");
    for row in &bundle.median_pivot {
        let cells: Vec<String> = row
            .hours
            .iter()
            .map(|c| c.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".into()))
            .collect();
        println!("  {:<24} {}", row.community, cells.join(" "));
    }

    println!("\nBucket cross-tab:");
    for ((community, sb, cb), n) in &bundle.bucket_crosstab {
        println!("  {:<24} score={} comments={} -> {}", community, sb, cb, n);
    }

    println!("\nTop words written to {}", TOP_WORDS_OUT);
    Ok(())
}
