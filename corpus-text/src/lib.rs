//! Plain-text book utilities shared by the bookstats workspace
//!
//! Covers the whole corpus pipeline:
//! - Loading (HTTP fetch, file read, Gutenberg marker stripping)
//! - Quote extraction/removal from one set of delimiter rules
//! - Sentence and token segmentation
//! - Dialogue exchanges (quotes clustered by character distance)
//! - Chapter detection and per-chapter statistics
//! - Random vs. systematic chapter sampling

pub mod chapters;
pub mod cluster;
pub mod config;
pub mod corpus;
pub mod dialogue;
pub mod error;
pub mod gutenberg;
pub mod quotes;
pub mod sampling;
pub mod segment;

pub use chapters::{ChapterRecord, ChapterRules, get_chapter_data, get_chapters};
pub use cluster::cluster_by_gap;
pub use config::CorpusConfig;
pub use corpus::{CorpusReport, CorpusSummary, analyze_corpus, fetch_corpus, load_corpus};
pub use dialogue::{DEFAULT_DIALOGUE_GAP, DialogueExchange, get_dialogue_exchanges, get_longest_dialogue};
pub use error::{CorpusError, Result};
pub use quotes::{QuoteRules, QuoteSpan, QuoteStyle, extract_quotes, find_quotes, has_quote, remove_quotes};
pub use sampling::{
    SampleComparison, SampleStats, compare_sample_lengths, get_random_sample_chapter_data,
    get_systematic_sample_chapter_data,
};
pub use segment::{split_sentences, tokenize};
