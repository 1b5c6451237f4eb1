// src/analysis/keywords.rs
// Frequency-based keyword extraction

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::report::{KeywordEntry, Level};

/// Maximum number of keywords kept in a report
pub const MAX_KEYWORDS: usize = 15;

/// A word must repeat at least this often to count as a keyword
pub const MIN_FREQUENCY: usize = 2;

const MIN_WORD_CHARS: usize = 4;
const MAX_WORD_CHARS: usize = 19;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "what",
        "which", "who", "when", "where", "why", "how", "all", "each", "every", "both", "few",
        "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "just", "into", "your", "their", "our", "about", "over", "also",
        "then", "them", "there", "here", "while", "after", "before", "because", "until",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, strip punctuation and split into words
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    PUNCTUATION
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Importance tier for a keyword seen `frequency` times
pub fn importance_for(frequency: usize) -> Level {
    if frequency > 5 {
        Level::High
    } else if frequency > 3 {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Extract the most frequent meaningful words from `text`
///
/// Density is the share of all words in `text`, as a percentage rounded to
/// two decimals. Ties in frequency are broken alphabetically.
pub fn extract_keywords(text: &str) -> Vec<KeywordEntry> {
    let words = tokenize(text);
    if words.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        let chars = word.chars().count();
        if !(MIN_WORD_CHARS..=MAX_WORD_CHARS).contains(&chars) || is_stop_word(word) {
            continue;
        }
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_FREQUENCY)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(MAX_KEYWORDS);

    let total = words.len() as f64;
    ranked
        .into_iter()
        .map(|(word, frequency)| KeywordEntry {
            word: word.to_string(),
            frequency,
            density: (frequency as f64 / total * 10_000.0).round() / 100.0,
            importance: importance_for(frequency),
        })
        .collect()
}
