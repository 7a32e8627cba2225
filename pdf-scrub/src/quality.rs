//! Line-level extraction quality checks and before/after comparison.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ocr::find_ocr_errors;

const SHORT_LINE_CHARS: usize = 3;
const UPPERCASE_MIN_CHARS: usize = 3;
const NUMBER_HEAVY_RATIO: f64 = 0.3;
const LONG_LINE_CHARS: usize = 200;

static MIXED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w*\d[A-Za-z]\w*|\w*[A-Za-z]\d\w*").expect("mixed token pattern is valid")
});

/// Offending lines and tokens, grouped by issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub empty_lines: Vec<String>,
    pub short_lines: Vec<String>,
    pub uppercase_lines: Vec<String>,
    pub number_heavy_lines: Vec<String>,
    /// Every digit-letter token, repeats included
    pub mixed_chars: Vec<String>,
    pub long_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCounts {
    pub empty_lines: usize,
    pub short_lines: usize,
    pub uppercase_lines: usize,
    pub number_heavy_lines: usize,
    /// Distinct digit-letter tokens
    pub mixed_chars: usize,
    pub very_long_lines: usize,
}

impl QualityReport {
    pub fn counts(&self) -> QualityCounts {
        QualityCounts {
            empty_lines: self.empty_lines.len(),
            short_lines: self.short_lines.len(),
            uppercase_lines: self.uppercase_lines.len(),
            number_heavy_lines: self.number_heavy_lines.len(),
            mixed_chars: self.mixed_chars.iter().collect::<BTreeSet<_>>().len(),
            very_long_lines: self.long_lines.len(),
        }
    }
}

/// At least one cased letter and no lowercase ones
fn is_uppercase_line(line: &str) -> bool {
    line.chars().any(|c| c.is_uppercase()) && !line.chars().any(|c| c.is_lowercase())
}

fn is_number_heavy(line: &str) -> bool {
    let chars = line.chars().count();
    let digits = line.chars().filter(|c| c.is_ascii_digit()).count();
    digits as f64 / chars.max(1) as f64 > NUMBER_HEAVY_RATIO && line.trim().chars().count() > 2
}

/// Inspect extracted text line by line; `None` for empty text
pub fn analyze_extraction_quality(text: &str, doc_name: &str) -> Option<QualityReport> {
    if text.is_empty() {
        log::warn!("No text to analyze for {}", doc_name);
        return None;
    }

    let mut report = QualityReport::default();
    for line in text.split('\n') {
        let trimmed_len = line.trim().chars().count();
        if trimmed_len == 0 {
            report.empty_lines.push(line.to_string());
        } else if trimmed_len < SHORT_LINE_CHARS {
            report.short_lines.push(line.to_string());
        }
        if is_uppercase_line(line) && trimmed_len > UPPERCASE_MIN_CHARS {
            report.uppercase_lines.push(line.to_string());
        }
        if is_number_heavy(line) {
            report.number_heavy_lines.push(line.to_string());
        }
        if line.chars().count() > LONG_LINE_CHARS {
            report.long_lines.push(line.to_string());
        }
    }
    report.mixed_chars = MIXED_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let counts = report.counts();
    log::info!(
        "{} extraction: {} empty, {} short, {} uppercase, {} number-heavy, {} mixed tokens, {} very long",
        doc_name,
        counts.empty_lines,
        counts.short_lines,
        counts.uppercase_lines,
        counts.number_heavy_lines,
        counts.mixed_chars,
        counts.very_long_lines
    );

    Some(report)
}

/// Character lengths through the pipeline and what the OCR check still finds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComparison {
    pub original_len: usize,
    pub cleaned_len: usize,
    pub fixed_len: usize,
    pub remaining_errors: usize,
}

impl VersionComparison {
    pub fn cleaning_delta(&self) -> i64 {
        self.cleaned_len as i64 - self.original_len as i64
    }

    pub fn fixing_delta(&self) -> i64 {
        self.fixed_len as i64 - self.cleaned_len as i64
    }
}

pub fn compare_versions(original: &str, cleaned: &str, fixed: &str) -> VersionComparison {
    let comparison = VersionComparison {
        original_len: original.chars().count(),
        cleaned_len: cleaned.chars().count(),
        fixed_len: fixed.chars().count(),
        remaining_errors: find_ocr_errors(fixed).total(),
    };
    log::info!(
        "Lengths: original {}, cleaned {} ({:+}), fixed {} ({:+}); {} potential errors remain",
        comparison.original_len,
        comparison.cleaned_len,
        comparison.cleaning_delta(),
        comparison.fixed_len,
        comparison.fixing_delta(),
        comparison.remaining_errors
    );
    comparison
}
