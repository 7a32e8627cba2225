//! Quote extraction and removal driven by one set of delimiter rules.
//!
//! Every rule is applied on its own, in order, so a single-quoted phrase
//! inside a double-quoted sentence is reported twice: once inside the outer
//! quote and once on its own. Overlaps are kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A pair of opening/closing quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteStyle {
    pub name: &'static str,
    pub open: char,
    pub close: char,
}

/// Quote styles recognised in book text, in the order they are applied.
pub const DEFAULT_STYLES: &[QuoteStyle] = &[
    QuoteStyle {
        name: "straight_double",
        open: '"',
        close: '"',
    },
    QuoteStyle {
        name: "curly_double",
        open: '\u{201c}',
        close: '\u{201d}',
    },
    QuoteStyle {
        name: "curly_single",
        open: '\u{2018}',
        close: '\u{2019}',
    },
    QuoteStyle {
        name: "straight_single",
        open: '\'',
        close: '\'',
    },
];

static DEFAULT_RULES: Lazy<QuoteRules> =
    Lazy::new(|| QuoteRules::new(DEFAULT_STYLES).expect("default quote styles compile"));

/// A quote located in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSpan {
    /// Name of the style that matched
    pub style: &'static str,
    /// Character offset of the opening delimiter
    pub start: usize,
    /// Character offset just past the closing delimiter
    pub end: usize,
    /// Inner text, trimmed
    pub content: String,
}

/// Compiled delimiter rules. Extraction, removal and detection all read the
/// same list.
#[derive(Debug, Clone)]
pub struct QuoteRules {
    rules: Vec<(QuoteStyle, Regex)>,
}

impl QuoteRules {
    /// Compile one `open [^open close]* close` pattern per style.
    pub fn new(styles: &[QuoteStyle]) -> Result<Self, regex::Error> {
        let rules = styles
            .iter()
            .map(|style| Regex::new(&pattern_for(style)).map(|re| (*style, re)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Rules for the four styles found in plain-text books.
    pub fn standard() -> &'static QuoteRules {
        &DEFAULT_RULES
    }

    pub fn styles(&self) -> impl Iterator<Item = &QuoteStyle> {
        self.rules.iter().map(|(style, _)| style)
    }

    /// Inner text of every quote, grouped by style in rule order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut quotes = Vec::new();
        for (_, re) in &self.rules {
            for caps in re.captures_iter(text) {
                let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
                if !inner.is_empty() {
                    quotes.push(inner.to_string());
                }
            }
        }
        quotes
    }

    /// Text with every quote (delimiters included) removed and whitespace
    /// collapsed to single spaces.
    pub fn remove(&self, text: &str) -> String {
        let mut remaining = text.to_string();
        for (_, re) in &self.rules {
            remaining = re.replace_all(&remaining, "").into_owned();
        }
        remaining.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whether any rule matches somewhere in `text`.
    pub fn has_quote(&self, text: &str) -> bool {
        self.rules.iter().any(|(_, re)| re.is_match(text))
    }

    /// Every non-empty quote with its character offsets, style by style.
    pub fn find(&self, text: &str) -> Vec<QuoteSpan> {
        let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_offset = |byte: usize| boundaries.partition_point(|&b| b < byte);

        let mut spans = Vec::new();
        for (style, re) in &self.rules {
            for caps in re.captures_iter(text) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let content = inner.as_str().trim();
                if content.is_empty() {
                    continue;
                }
                spans.push(QuoteSpan {
                    style: style.name,
                    start: char_offset(whole.start()),
                    end: char_offset(whole.end()),
                    content: content.to_string(),
                });
            }
        }
        spans
    }
}

fn pattern_for(style: &QuoteStyle) -> String {
    let open = regex::escape(&style.open.to_string());
    let close = regex::escape(&style.close.to_string());
    let excluded = if style.open == style.close {
        open.clone()
    } else {
        format!("{}{}", open, close)
    };
    format!("{}([^{}]*){}", open, excluded, close)
}

/// Extract quoted text using the standard rules.
pub fn extract_quotes(text: &str) -> Vec<String> {
    QuoteRules::standard().extract(text)
}

/// Remove quoted text using the standard rules.
pub fn remove_quotes(text: &str) -> String {
    QuoteRules::standard().remove(text)
}

/// Check for quoted text using the standard rules.
pub fn has_quote(text: &str) -> bool {
    QuoteRules::standard().has_quote(text)
}

/// Locate quotes using the standard rules.
pub fn find_quotes(text: &str) -> Vec<QuoteSpan> {
    QuoteRules::standard().find(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_double_quotes() {
        let text = "He said \"Hello world\" and then \"Goodbye\" to everyone.";
        assert_eq!(extract_quotes(text), vec!["Hello world", "Goodbye"]);
    }

    #[test]
    fn test_extract_curly_double_quotes() {
        let text = "She said \u{201c}Welcome\u{201d} and then \u{201c}Farewell\u{201d} to the guests.";
        assert_eq!(extract_quotes(text), vec!["Welcome", "Farewell"]);
    }

    #[test]
    fn test_extract_single_quotes() {
        let text = "He said 'Hello there' and then 'See you later' to his friend.";
        assert_eq!(extract_quotes(text), vec!["Hello there", "See you later"]);
    }

    #[test]
    fn test_extract_curly_single_quotes() {
        let text = "\u{2018}Run,\u{2019} she whispered.";
        assert_eq!(extract_quotes(text), vec!["Run,"]);
    }

    #[test]
    fn test_extract_mixed_styles() {
        let text = "He said \"Hello\" and then 'Goodbye' to everyone.";
        let quotes = extract_quotes(text);
        assert_eq!(quotes.len(), 2);
        assert!(quotes.contains(&"Hello".to_string()));
        assert!(quotes.contains(&"Goodbye".to_string()));
    }

    #[test]
    fn test_extract_empty_and_plain_text() {
        assert!(extract_quotes("").is_empty());
        assert!(extract_quotes("This is just plain text with no quotes at all.").is_empty());
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let text = "He said \"  Hello world  \" and then \"  Goodbye  \" to everyone.";
        assert_eq!(extract_quotes(text), vec!["Hello world", "Goodbye"]);
    }

    #[test]
    fn test_extract_skips_empty_quotes() {
        assert!(extract_quotes("an empty \"   \" pair").is_empty());
    }

    #[test]
    fn test_extract_spans_newlines() {
        let text = "\"First line\nsecond line\"";
        assert_eq!(extract_quotes(text), vec!["First line\nsecond line"]);
    }

    #[test]
    fn test_nested_quotes_are_not_deduplicated() {
        let text = "He said \"She told me 'Hello there' yesterday\" to the group.";
        let quotes = extract_quotes(text);
        assert_eq!(
            quotes,
            vec!["She told me 'Hello there' yesterday", "Hello there"]
        );
    }

    #[test]
    fn test_remove_double_quotes() {
        let text = "He said \"Hello world\" and then \"Goodbye\" to everyone.";
        assert_eq!(remove_quotes(text), "He said and then to everyone.");
    }

    #[test]
    fn test_remove_curly_quotes() {
        let text = "She said \u{201c}Welcome\u{201d} and then \u{201c}Farewell\u{201d} to the guests.";
        assert_eq!(remove_quotes(text), "She said and then to the guests.");
    }

    #[test]
    fn test_remove_without_quotes_normalizes_whitespace() {
        assert_eq!(remove_quotes("plain   text\n here"), "plain text here");
        assert_eq!(remove_quotes(""), "");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let text = "\u{201c}Come in,\u{201d} he said. She waited. \"Now,\" she replied, 'softly'.";
        let once = remove_quotes(text);
        assert_eq!(once, "he said. She waited. she replied, .");
        assert_eq!(remove_quotes(&once), once);
    }

    #[test]
    fn test_remove_and_extract_cover_all_words() {
        let text = "The captain said \"hold the line\" and the crew obeyed";
        let mut words: Vec<String> = remove_quotes(text)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for quote in extract_quotes(text) {
            words.extend(quote.split_whitespace().map(str::to_string));
        }
        let mut original: Vec<String> = text
            .replace('"', "")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        words.sort();
        original.sort();
        assert_eq!(words, original);
    }

    #[test]
    fn test_has_quote() {
        assert!(has_quote("he said \"yes\""));
        assert!(has_quote("\u{201c}yes\u{201d}"));
        assert!(!has_quote("a lone \" mark"));
        assert!(!has_quote("nothing here"));
    }

    #[test]
    fn test_find_reports_offsets() {
        let text = "ab \"cd\" ef";
        let spans = find_quotes(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].style, "straight_double");
        assert_eq!(spans[0].start, 3);
        assert_eq!(spans[0].end, 7);
        assert_eq!(spans[0].content, "cd");
    }

    #[test]
    fn test_find_offsets_count_characters_not_bytes() {
        let text = "x \u{201c}hi\u{201d} caf\u{e9} \"ok\"";
        let spans = find_quotes(text);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (12, 16));
        assert_eq!((spans[1].start, spans[1].end), (2, 6));

        let chars: Vec<char> = text.chars().collect();
        let quoted: String = chars[spans[1].start..spans[1].end].iter().collect();
        assert_eq!(quoted, "\u{201c}hi\u{201d}");
    }

    #[test]
    fn test_custom_rules() {
        let rules = QuoteRules::new(&[QuoteStyle {
            name: "guillemet",
            open: '\u{00ab}',
            close: '\u{00bb}',
        }])
        .unwrap();
        assert_eq!(rules.extract("il dit \u{00ab} bonjour \u{00bb}"), vec!["bonjour"]);
        assert_eq!(rules.remove("il dit \u{00ab}bonjour\u{00bb} puis"), "il dit puis");
        assert_eq!(rules.styles().count(), 1);
    }

    proptest! {
        #[test]
        fn prop_double_quoted_words_extracted_in_order(
            words in proptest::collection::vec("[a-z]{1,8}", 1..6)
        ) {
            let text = words
                .iter()
                .map(|w| format!("\"{}\"", w))
                .collect::<Vec<_>>()
                .join(" and ");
            prop_assert_eq!(extract_quotes(&text), words);
        }
    }
}
