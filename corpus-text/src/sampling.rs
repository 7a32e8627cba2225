//! Random and systematic chapter samples, and how their lengths compare.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::chapters::ChapterRecord;

/// Chapters drawn by the random sampler unless the caller asks otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Mean lengths over one sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleStats {
    pub chapter_count: usize,
    pub mean_tokens: f64,
    pub mean_words: f64,
    pub mean_characters: f64,
    pub mean_sentences: f64,
}

impl SampleStats {
    /// Arithmetic means; an empty sample gives zeros.
    pub fn from_chapters(chapters: &[ChapterRecord]) -> Self {
        if chapters.is_empty() {
            return Self::default();
        }

        let n = chapters.len() as f64;
        let mean = |f: fn(&ChapterRecord) -> usize| chapters.iter().map(f).sum::<usize>() as f64 / n;

        Self {
            chapter_count: chapters.len(),
            mean_tokens: mean(|c| c.token_count),
            mean_words: mean(|c| c.word_count),
            mean_characters: mean(|c| c.character_count),
            mean_sentences: mean(|c| c.sentence_count),
        }
    }
}

/// Both samples side by side with the random-minus-systematic differences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleComparison {
    pub random: SampleStats,
    pub systematic: SampleStats,
    pub token_difference: f64,
    pub word_difference: f64,
    pub character_difference: f64,
    pub sentence_difference: f64,
}

/// Keep the chapters whose title was selected, in book order.
fn chapters_with_titles(selected: &[&String], chapters: &[ChapterRecord]) -> Vec<ChapterRecord> {
    let wanted: HashSet<&str> = selected.iter().map(|t| t.as_str()).collect();
    chapters
        .iter()
        .filter(|c| wanted.contains(c.title.as_str()))
        .cloned()
        .collect()
}

/// Shuffle the titles, keep the first `size`, and return those chapters.
pub fn get_random_sample_chapter_data<R: Rng + ?Sized>(
    titles: &[String],
    chapters: &[ChapterRecord],
    size: usize,
    rng: &mut R,
) -> Vec<ChapterRecord> {
    let mut shuffled: Vec<&String> = titles.iter().collect();
    shuffled.shuffle(rng);
    shuffled.truncate(size);

    let sample = chapters_with_titles(&shuffled, chapters);
    if sample.is_empty() {
        log::warn!("Random sample is empty ({} titles available)", titles.len());
    }
    sample
}

/// Take every k-th title, where k defaults to one tenth of the title count.
pub fn get_systematic_sample_chapter_data(
    titles: &[String],
    chapters: &[ChapterRecord],
    step: Option<usize>,
) -> Vec<ChapterRecord> {
    let step = step.unwrap_or(titles.len() / 10).max(1);
    let selected: Vec<&String> = titles.iter().step_by(step).collect();

    log::debug!("Systematic sample: step {}, {} titles", step, selected.len());
    chapters_with_titles(&selected, chapters)
}

/// Compare mean chapter lengths of the two samples.
pub fn compare_sample_lengths(random: &[ChapterRecord], systematic: &[ChapterRecord]) -> SampleComparison {
    let random = SampleStats::from_chapters(random);
    let systematic = SampleStats::from_chapters(systematic);

    SampleComparison {
        token_difference: random.mean_tokens - systematic.mean_tokens,
        word_difference: random.mean_words - systematic.mean_words,
        character_difference: random.mean_characters - systematic.mean_characters,
        sentence_difference: random.mean_sentences - systematic.mean_sentences,
        random,
        systematic,
    }
}
