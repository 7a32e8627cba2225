//! Loading a book and splitting it into quote and non-quote material.

use std::path::Path;

use serde::Serialize;

use crate::error::{CorpusError, Result};
use crate::gutenberg::strip_markers;
use crate::quotes::QuoteRules;
use crate::segment::{normalize_whitespace, partition_by_quotes, split_sentences, tokenize};

/// Everything derived from one pass over a book.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    pub sentences: Vec<String>,
    pub tokenized_sentences: Vec<Vec<String>>,
    pub all_tokens: Vec<String>,
    /// Quoted passages taken from the raw text
    pub quotes: Vec<String>,
    /// Whitespace-normalised text with every quote removed
    pub non_quotes: String,
    pub quote_sentences: Vec<String>,
    pub non_quote_sentences: Vec<String>,
    pub quote_tokens: Vec<String>,
    pub non_quote_tokens: Vec<String>,
}

/// Counts reported for a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub sentences: usize,
    pub quotes: usize,
    pub quote_sentences: usize,
    pub non_quote_sentences: usize,
    pub quote_tokens: usize,
    pub non_quote_tokens: usize,
}

impl CorpusReport {
    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            sentences: self.sentences.len(),
            quotes: self.quotes.len(),
            quote_sentences: self.quote_sentences.len(),
            non_quote_sentences: self.non_quote_sentences.len(),
            quote_tokens: self.quote_tokens.len(),
            non_quote_tokens: self.non_quote_tokens.len(),
        }
    }
}

/// Split a book into sentences and tokens, separating quoted material.
///
/// Quotes are extracted before whitespace is normalised so multi-line
/// passages keep their line breaks; everything else works on the
/// normalised text.
pub fn analyze_corpus(text: &str) -> CorpusReport {
    let rules = QuoteRules::standard();

    let quotes = rules.extract(text);
    let content = normalize_whitespace(text);
    let non_quotes = rules.remove(&content);

    let sentences = split_sentences(&content);
    let (quote_sentences, non_quote_sentences) = partition_by_quotes(&sentences, rules);

    let tokenized_sentences: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();
    let all_tokens: Vec<String> = tokenized_sentences.iter().flatten().cloned().collect();
    let (quote_tokens, non_quote_tokens) = partition_by_quotes(&all_tokens, rules);

    let report = CorpusReport {
        sentences,
        tokenized_sentences,
        all_tokens,
        quotes,
        non_quotes,
        quote_sentences,
        non_quote_sentences,
        quote_tokens,
        non_quote_tokens,
    };

    let summary = report.summary();
    log::info!(
        "Sentences: {}, quotes: {}, quote sentences: {}, non-quote sentences: {}, quote tokens: {}, non-quote tokens: {}",
        summary.sentences,
        summary.quotes,
        summary.quote_sentences,
        summary.non_quote_sentences,
        summary.quote_tokens,
        summary.non_quote_tokens
    );

    report
}

/// Download a plain-text book.
pub async fn fetch_text(url: &str) -> Result<String> {
    log::info!("Fetching corpus: {}", url);

    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CorpusError::Http {
            url: url.to_string(),
            status: Some(status.as_u16()),
        });
    }

    Ok(response.text().await?)
}

/// Read a plain-text book from disk.
pub fn read_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

fn prepare(text: &str, strip: bool) -> CorpusReport {
    if strip {
        analyze_corpus(&strip_markers(text))
    } else {
        analyze_corpus(text)
    }
}

/// Fetch and analyse a book; a failed download is logged and yields `None`.
pub async fn fetch_corpus(url: &str, strip: bool) -> Option<CorpusReport> {
    match fetch_text(url).await {
        Ok(text) => Some(prepare(&text, strip)),
        Err(e) => {
            log::error!("Failed to fetch {}: {}", url, e);
            None
        }
    }
}

/// Read and analyse a book; a failed read is logged and yields `None`.
pub fn load_corpus(path: &Path, strip: bool) -> Option<CorpusReport> {
    match read_text(path) {
        Ok(text) => Some(prepare(&text, strip)),
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}
