// Console presentation of corpus results

use anyhow::Result;
use corpus_text::{ChapterRecord, CorpusSummary, DialogueExchange, SampleComparison};
use serde::Serialize;

/// Print any result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_summary(summary: &CorpusSummary) {
    println!("Number of sentences: {}", summary.sentences);
    println!("Number of quotes found: {}", summary.quotes);
    println!("Quote sentences: {}", summary.quote_sentences);
    println!("Non-quote sentences: {}", summary.non_quote_sentences);
    println!("Quote tokens: {}", summary.quote_tokens);
    println!("Non-quote tokens: {}", summary.non_quote_tokens);
}

pub fn print_chapters(chapters: &[ChapterRecord]) {
    if chapters.is_empty() {
        println!("No chapters found");
        return;
    }

    println!(
        "{:>4}  {:<32} {:>9} {:>8} {:>8} {:>10}",
        "#", "Title", "Sentences", "Words", "Tokens", "Characters"
    );
    for chapter in chapters {
        println!(
            "{:>4}  {:<32} {:>9} {:>8} {:>8} {:>10}",
            chapter.number,
            truncate(&chapter.title, 32),
            chapter.sentence_count,
            chapter.word_count,
            chapter.token_count,
            chapter.character_count
        );
    }
    println!("---");
    println!("Chapters: {}", chapters.len());
}

pub fn print_exchange(exchange: &DialogueExchange) {
    println!(
        "Dialogue exchange: {} quotes (characters {}..{})",
        exchange.quote_count(),
        exchange.start,
        exchange.end
    );
    println!(
        "  Characters: {}, Words: {}, Sentences: {}",
        exchange.character_count, exchange.word_count, exchange.sentence_count
    );
    for quote in &exchange.quotes {
        println!("  - {}", truncate(&quote.content, 100));
    }
}

pub fn print_comparison(comparison: &SampleComparison) {
    println!("{:<12} {:>8} {:>10} {:>10} {:>12} {:>10}", "Sample", "Chapters", "Tokens", "Words", "Characters", "Sentences");
    for (name, stats) in [("random", &comparison.random), ("systematic", &comparison.systematic)] {
        println!(
            "{:<12} {:>8} {:>10.1} {:>10.1} {:>12.1} {:>10.1}",
            name,
            stats.chapter_count,
            stats.mean_tokens,
            stats.mean_words,
            stats.mean_characters,
            stats.mean_sentences
        );
    }
    println!(
        "{:<12} {:>8} {:>+10.1} {:>+10.1} {:>+12.1} {:>+10.1}",
        "difference",
        "",
        comparison.token_difference,
        comparison.word_difference,
        comparison.character_difference,
        comparison.sentence_difference
    );
}

/// Shorten to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
