//! Sentence splitting and tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::quotes::QuoteRules;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// A word with any trailing quote marks, or a bare quote mark.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\w+['"]*|'|""#).unwrap());

/// Split text on runs of terminal punctuation, dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize a sentence into words and quote marks.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count tokens without allocating them.
pub fn count_tokens(text: &str) -> usize {
    TOKEN.find_iter(text).count()
}

/// Collapse every whitespace run to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Partition items into (quote-bearing, plain), keeping order.
pub fn partition_by_quotes(items: &[String], rules: &QuoteRules) -> (Vec<String>, Vec<String>) {
    items
        .iter()
        .cloned()
        .partition(|item| rules.has_quote(item))
}
