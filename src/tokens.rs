//! Tokenizer expander: one row per (post, token) pair.
//!
//! Titles arrive pre-tokenized as a JSON string array. Duplicates and order
//! are preserved; a null, empty, or malformed payload expands to zero rows.

use crate::normalize::Post;
use serde::Serialize;

/// A (post id, token) pair. Many per post, repeated tokens repeat rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub post_id: u64,
    pub token: String,
}

/// Parse one JSON-array token payload. Anything that is not an array of
/// strings yields no tokens — not an error condition.
pub fn explode_payload(post_id: u64, payload: &str) -> Vec<Token> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(payload) {
        Ok(words) => words
            .into_iter()
            .map(|token| Token { post_id, token })
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Expand the token payloads of all posts into a flat token table.
pub fn explode_all(posts: &[Post], payloads: &[String]) -> Vec<Token> {
    debug_assert_eq!(posts.len(), payloads.len());
    let mut out = Vec::new();
    for (post, payload) in posts.iter().zip(payloads.iter()) {
        out.extend(explode_payload(post.id, payload));
    }
    tracing::debug!(tokens = out.len(), posts = posts.len(), "token expansion done");
    out
}
