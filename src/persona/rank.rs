//! Keyword-relevance ranking for answer-time context selection.
//!
//! Literal keyword-frequency scoring, not semantic search: the question is
//! tokenized, stop words are dropped, and each stored chunk is scored by
//! summing substring occurrence counts of the surviving keywords. Counting is
//! substring-based, so a keyword also matches inside longer words.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Ranking knobs. Defaults match the answer pipeline: three chunks, a 4000
/// character context budget, and no partial chunk smaller than 500 characters.
pub struct RankConfig {
    pub top_k: usize,
    pub max_chars: usize,
    pub min_partial_chars: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_chars: 4000,
            min_partial_chars: 500,
        }
    }
}

/// Common English function words excluded from keyword extraction.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her",
    "was", "one", "our", "out", "day", "get", "has", "him", "his", "how",
    "man", "new", "now", "old", "see", "two", "way", "who", "boy", "did",
    "its", "let", "put", "say", "she", "too", "use", "what", "when", "where",
    "with", "that", "this", "have", "from", "they", "been", "about", "there",
    "which", "their", "would", "these", "than", "your",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("valid word pattern"))
}

/// Extract salient keywords from a question: lowercased alphabetic words of
/// length >= 3, minus stop words.
fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Score a chunk: sum of non-overlapping occurrence counts of each keyword in
/// the lowercased chunk, weight 1.0 per occurrence.
fn score_chunk(chunk: &str, keywords: &[String]) -> f64 {
    let lowered = chunk.to_lowercase();
    keywords
        .iter()
        .map(|kw| lowered.matches(kw.as_str()).count() as f64)
        .sum()
}

/// Select the most relevant chunks for a question.
///
/// Chunks are scored by keyword frequency and stably sorted descending, so
/// ties (including the all-zero case) keep their original order. The top
/// `top_k` survivors are then assembled under the character budget: a chunk
/// that would overflow is truncated to the remaining budget, and kept only if
/// that remainder exceeds `min_partial_chars`. Empty input yields empty
/// output; a question with no usable keywords falls back to the first `top_k`
/// chunks unranked.
pub fn rank(question: &str, chunks: &[String], config: &RankConfig) -> Vec<String> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let keywords = extract_keywords(question);
    if keywords.is_empty() {
        return chunks.iter().take(config.top_k).cloned().collect();
    }

    let mut scored: Vec<(f64, &String)> = chunks
        .iter()
        .map(|chunk| (score_chunk(chunk, &keywords), chunk))
        .collect();
    // sort_by is stable: equal scores keep encounter order
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut selected = Vec::new();
    let mut total_chars = 0usize;

    for (_score, chunk) in scored.into_iter().take(config.top_k) {
        let chunk_chars = chunk.chars().count();
        if total_chars + chunk_chars <= config.max_chars {
            selected.push(chunk.clone());
            total_chars += chunk_chars;
        } else {
            let remaining = config.max_chars - total_chars;
            if remaining > config.min_partial_chars {
                selected.push(truncate_chars(chunk, remaining));
            }
            break;
        }
    }

    selected
}

/// Truncate to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
