//! Keyword extraction used when no structured interpretation is available.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Words that never count as search keywords.
pub const STOPWORDS: &[&str] = &[
    "find", "show", "frame", "frames", "with", "please", "can", "you", "the", "a", "an", "any",
    "all", "of", "for", "look", "search", "detect", "spot", "every", "to", "in", "on", "at",
    "video", "footage", "objects", "and",
];

/// Minimum keyword length in letters.
pub const MIN_KEYWORD_LENGTH: usize = 3;

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]{3,}").expect("valid regex"));

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Extract the keyword set from free text.
///
/// Lowercases the input, takes every maximal run of at least three ASCII
/// letters, and drops stopwords. Duplicates collapse.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    KEYWORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stopword(word))
        .map(str::to_string)
        .collect()
}
