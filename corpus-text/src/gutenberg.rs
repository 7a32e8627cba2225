//! Project Gutenberg header/footer removal.

use once_cell::sync::Lazy;
use regex::Regex;

static START_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\*\*\*\s*START OF (?:THE|THIS) PROJECT GUTENBERG EBOOK[^\n]*$").unwrap()
});

static END_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\*\*\*\s*END OF (?:THE|THIS) PROJECT GUTENBERG EBOOK[^\n]*$").unwrap()
});

/// The book text between the Gutenberg start and end marker lines.
///
/// Returns the input unchanged, with a warning, when either marker is
/// missing or they appear out of order.
pub fn strip_markers(text: &str) -> String {
    let Some(start) = START_MARKER.find(text) else {
        log::warn!("Gutenberg start marker not found, using full text");
        return text.to_string();
    };

    let Some(end) = END_MARKER.find_at(text, start.end()) else {
        log::warn!("Gutenberg end marker not found, using full text");
        return text.to_string();
    };

    text[start.end()..end.start()].trim().to_string()
}
