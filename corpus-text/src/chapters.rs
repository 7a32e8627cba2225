//! Chapter title detection and chapter segmentation for plain-text books.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::segment::{count_tokens, split_sentences};

/// A whole line of capital letters and spaces.
static TITLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z ]+$").unwrap());

/// Heuristics used to recognise chapter titles and keep real chapters.
#[derive(Debug, Clone)]
pub struct ChapterRules {
    /// Section headers that look like titles but are not chapters
    pub reserved_headers: Vec<String>,
    /// Require a prose line within `lookahead_lines` after a title
    pub strict: bool,
    pub lookahead_lines: usize,
    /// A prose line must be longer than this
    pub min_body_line_chars: usize,
    /// Chapters whose trimmed body is this long or shorter are dropped
    pub min_chapter_chars: usize,
    /// Only search after the first line equal to this marker
    pub start_marker: Option<String>,
}

impl Default for ChapterRules {
    fn default() -> Self {
        Self {
            reserved_headers: vec!["FIRST PART".to_string(), "SECOND PART".to_string()],
            strict: true,
            lookahead_lines: 10,
            min_body_line_chars: 20,
            min_chapter_chars: 100,
            start_marker: None,
        }
    }
}

impl ChapterRules {
    /// Rules without the prose lookahead.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    fn is_title_candidate(&self, line: &str) -> bool {
        line.chars().count() > 2
            && TITLE_LINE.is_match(line)
            && !self.reserved_headers.iter().any(|h| h == line)
    }

    fn has_prose_after(&self, lines: &[&str], index: usize) -> bool {
        lines
            .iter()
            .skip(index + 1)
            .take(self.lookahead_lines)
            .map(|l| l.trim())
            .any(|l| !is_upper_line(l) && l.chars().count() > self.min_body_line_chars)
    }

    /// Index of the first line to consider.
    fn first_line(&self, lines: &[&str]) -> usize {
        let Some(marker) = self.start_marker.as_deref() else {
            return 0;
        };
        match lines.iter().position(|l| l.trim() == marker.trim()) {
            Some(i) => i + 1,
            None => {
                log::warn!("Start marker not found, searching the whole text: {}", marker);
                0
            }
        }
    }
}

/// One chapter with its location and derived counts.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterRecord {
    pub title: String,
    /// 1-based position of the title in the list it was looked up from
    pub number: usize,
    /// First content line (0-based, inclusive)
    pub start_line: usize,
    /// Line of the next chapter title, or the line count (exclusive)
    pub end_line: usize,
    pub sentence_count: usize,
    pub word_count: usize,
    pub token_count: usize,
    pub character_count: usize,
    pub content: String,
}

impl ChapterRecord {
    fn new(title: &str, number: usize, start_line: usize, end_line: usize, content: String) -> Self {
        Self {
            title: title.to_string(),
            number,
            start_line,
            end_line,
            sentence_count: split_sentences(&content).len(),
            word_count: content.split_whitespace().count(),
            token_count: count_tokens(&content),
            character_count: content.chars().count(),
            content,
        }
    }
}

/// True when the line has cased letters and none of them are lowercase.
pub fn is_upper_line(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Candidate chapter titles in document order.
pub fn get_chapters(text: &str, rules: &ChapterRules) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let first = rules.first_line(&lines);

    let titles: Vec<String> = (first..lines.len())
        .filter(|&i| {
            let line = lines[i].trim();
            rules.is_title_candidate(line) && (!rules.strict || rules.has_prose_after(&lines, i))
        })
        .map(|i| lines[i].trim().to_string())
        .collect();

    log::debug!("Detected {} chapter titles", titles.len());
    titles
}

/// Locate each title and cut the text between consecutive titles.
///
/// Titles are matched against whole trimmed lines, each search starting after
/// the previous match. A title that never appears is skipped. Chapters whose
/// body is too short to be real are dropped.
pub fn get_chapter_data(titles: &[String], text: &str, rules: &ChapterRules) -> Vec<ChapterRecord> {
    let lines: Vec<&str> = text.lines().collect();
    let mut cursor = rules.first_line(&lines);

    // (number, title, line index)
    let mut located: Vec<(usize, &str, usize)> = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let wanted = title.trim();
        match lines[cursor..].iter().position(|l| l.trim() == wanted) {
            Some(offset) => {
                let line = cursor + offset;
                located.push((i + 1, wanted, line));
                cursor = line + 1;
            }
            None => log::warn!("Chapter title not found: {}", wanted),
        }
    }

    let mut chapters = Vec::new();
    for (k, &(number, title, line)) in located.iter().enumerate() {
        let start = line + 1;
        let end = located.get(k + 1).map_or(lines.len(), |next| next.2);
        let content = lines[start..end].join("\n").trim().to_string();

        let length = content.chars().count();
        if length <= rules.min_chapter_chars {
            log::debug!("Skipping '{}': body too short ({} chars)", title, length);
            continue;
        }

        chapters.push(ChapterRecord::new(title, number, start, end, content));
    }

    chapters
}
