mod aggregate;
mod bucketing;
mod config;
mod counting;
mod date;
mod derive;
mod loader;
mod normalize;
mod pipeline;
mod progress;
mod tokens;
mod topwords;
mod util;

pub use crate::config::LoadOptions;
pub use crate::pipeline::{Dataset, PostsEtl};

pub use crate::loader::{LoadStats, RawRecord, EXPECTED_FIELDS};
pub use crate::normalize::Post;
pub use crate::tokens::Token;

pub use crate::aggregate::{
    median_hour_pivot, median_score_by_hour, percentile_linear, MedianHourRow, ReportBundle,
};
pub use crate::bucketing::{bucket_crosstab, CommentsBucket, ScoreBucket};
pub use crate::counting::{posts_per_year, yearly_averages, YearlyAverages};
pub use crate::topwords::{top_words, TopWordResult, TopWordStore, TOP_WORDS_LIMIT};

// Expose calendar helpers so binaries/tests can reuse the fixed formats.
pub use crate::date::{parse_created, parse_epoch_seconds, ym_key};

// Export robust file ops from util so binaries can import from crate root.
pub use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic_backoff};
