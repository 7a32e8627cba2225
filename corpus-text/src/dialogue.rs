//! Dialogue exchanges: runs of quotes close enough to read as one conversation.
//!
//! The distance threshold is a fixed number of characters and does not adapt
//! to sentence length, so long narrative interjections between lines of the
//! same conversation will split it.

use serde::Serialize;

use crate::cluster::cluster_by_gap;
use crate::quotes::{QuoteRules, QuoteSpan};
use crate::segment::split_sentences;

/// Default maximum gap, in characters, between quotes of one exchange.
pub const DEFAULT_DIALOGUE_GAP: usize = 500;

/// A maximal run of nearby quotes.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueExchange {
    /// Quotes in ascending start order
    pub quotes: Vec<QuoteSpan>,
    /// Character offset where the first quote opens
    pub start: usize,
    /// Character offset where the last quote closes
    pub end: usize,
    /// Quote contents joined by single spaces
    pub content: String,
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
}

impl DialogueExchange {
    fn from_quotes(quotes: Vec<QuoteSpan>) -> Self {
        let start = quotes.first().map_or(0, |q| q.start);
        let end = quotes.iter().map(|q| q.end).max().unwrap_or(0);
        let content = quotes
            .iter()
            .map(|q| q.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            start,
            end,
            character_count: content.chars().count(),
            word_count: content.split_whitespace().count(),
            sentence_count: split_sentences(&content).len(),
            content,
            quotes,
        }
    }

    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }
}

/// Group every quote in `text` into exchanges, in document order.
pub fn get_dialogue_exchanges(text: &str, max_gap: usize) -> Vec<DialogueExchange> {
    exchanges_with_rules(text, max_gap, QuoteRules::standard())
}

/// Group quotes found by `rules` into exchanges, in document order.
pub fn exchanges_with_rules(text: &str, max_gap: usize, rules: &QuoteRules) -> Vec<DialogueExchange> {
    let quotes = rules.find(text);
    cluster_by_gap(quotes, max_gap, |q| q.start..q.end)
        .into_iter()
        .map(DialogueExchange::from_quotes)
        .collect()
}

/// The exchange with the most quotes; the earliest one wins a tie.
pub fn get_longest_dialogue(text: &str, max_gap: usize) -> Option<DialogueExchange> {
    let exchanges = get_dialogue_exchanges(text, max_gap);
    let longest = exchanges
        .into_iter()
        .reduce(|best, next| {
            if next.quote_count() > best.quote_count() {
                next
            } else {
                best
            }
        });

    if let Some(ref exchange) = longest {
        log::debug!(
            "Longest dialogue: {} quotes, {} words, chars {}..{}",
            exchange.quote_count(),
            exchange.word_count,
            exchange.start,
            exchange.end
        );
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quoted words placed at exact character offsets, padded with spaces.
    fn text_with_quotes_at(offsets: &[usize]) -> String {
        let mut text = String::new();
        for (i, &offset) in offsets.iter().enumerate() {
            while text.chars().count() < offset {
                text.push(' ');
            }
            text.push_str(&format!("\"line {}.\"", i));
        }
        text
    }

    #[test]
    fn test_groups_by_distance() {
        let text = text_with_quotes_at(&[0, 50, 600]);
        let exchanges = get_dialogue_exchanges(&text, 500);
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[0].quote_count(), 2);
        assert_eq!(exchanges[1].quote_count(), 1);
        assert_eq!(exchanges[0].start, 0);
        assert_eq!(exchanges[1].start, 600);
    }

    #[test]
    fn test_longest_dialogue_aggregates() {
        let text = text_with_quotes_at(&[0, 50, 600]);
        let longest = get_longest_dialogue(&text, 500).unwrap();
        assert_eq!(longest.quote_count(), 2);
        assert_eq!(longest.content, "line 0. line 1.");
        assert_eq!(longest.word_count, 4);
        assert_eq!(longest.sentence_count, 2);
        assert_eq!(longest.character_count, 15);
        assert_eq!(longest.end, 50 + "\"line 1.\"".len());
    }

    #[test]
    fn test_longest_dialogue_tie_keeps_first() {
        let text = text_with_quotes_at(&[0, 1000]);
        let longest = get_longest_dialogue(&text, 500).unwrap();
        assert_eq!(longest.start, 0);
        assert_eq!(longest.content, "line 0.");
    }

    #[test]
    fn test_smaller_threshold_splits_more() {
        let text = text_with_quotes_at(&[0, 50, 600]);
        assert_eq!(get_dialogue_exchanges(&text, 20).len(), 3);
        assert_eq!(get_dialogue_exchanges(&text, 10_000).len(), 1);
    }

    #[test]
    fn test_gap_is_measured_in_characters() {
        // 300 two-byte letters between the quotes: a 300-character gap spanning 600 bytes
        let text = format!("\"Hello.\"{}\"Goodbye.\"", "\u{e9}".repeat(300));
        let exchanges = get_dialogue_exchanges(&text, DEFAULT_DIALOGUE_GAP);
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].quote_count(), 2);
        assert_eq!(exchanges[0].start, 0);
        assert_eq!(exchanges[0].end, text.chars().count());

        assert_eq!(get_dialogue_exchanges(&text, 300).len(), 2);
    }

    #[test]
    fn test_mixed_styles_in_one_exchange() {
        let text = "\u{201c}Are you coming?\u{201d} she asked. \"Yes,\" he said.";
        let longest = get_longest_dialogue(text, DEFAULT_DIALOGUE_GAP).unwrap();
        assert_eq!(longest.quote_count(), 2);
        assert_eq!(longest.quotes[0].content, "Are you coming?");
        assert_eq!(longest.quotes[1].content, "Yes,");
    }

    #[test]
    fn test_no_quotes() {
        assert!(get_longest_dialogue("No one spoke at all.", 500).is_none());
        assert!(get_dialogue_exchanges("", 500).is_empty());
    }
}
