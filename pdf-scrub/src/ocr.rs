//! Heuristic OCR-artifact detection and correction.
//!
//! Nothing here is validated against ground truth; the rules flag and fix
//! the confusions that show up most often in scanned course catalogs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cleanup::{Substitution, table};

static CHAR_CONFUSIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bl[A-Z]",    // l for I
        r"\b0[A-Za-z]", // 0 for O
        r"rn[a-z]",     // rn for m
    ]
    .iter()
    .map(|p| Regex::new(p).expect("confusion patterns are valid"))
    .collect()
});

static BROKEN_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]{1,2}\s+[a-z]{2,}\b").expect("broken word pattern is valid"));

static DIGIT_LETTER_MIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z]+\d+[A-Za-z]*|\d+[A-Za-z]+").expect("digit-letter pattern is valid")
});

static FIXES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    table(&[
        // Abbreviations go first so later rules leave them alone
        (r"\bPHD\b", "PhD"),
        (r"\bDSC\b", "DSc"),
        (r"\bl([A-Z][a-z])", "I${1}"),
        (r"\b0([A-Za-z])", "O${1}"),
        (r"([a-z])0\b", "${1}o"),
        (r"rn([a-z])", "m${1}"),
        (r"([a-z])rn\b", "${1}m"),
        (r"\bU niversity\b", "University"),
        (r"\bE ngineering\b", "Engineering"),
        (r"\bD epartment\b", "Department"),
    ])
});

/// Suspicious fragments found in a text, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrFindings {
    pub character_substitutions: Vec<String>,
    pub broken_words: Vec<String>,
    pub numbers_in_words: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrCounts {
    pub character_substitutions: usize,
    pub broken_words: usize,
    pub numbers_in_words: usize,
}

impl OcrFindings {
    pub fn counts(&self) -> OcrCounts {
        OcrCounts {
            character_substitutions: self.character_substitutions.len(),
            broken_words: self.broken_words.len(),
            numbers_in_words: self.numbers_in_words.len(),
        }
    }

    pub fn total(&self) -> usize {
        let counts = self.counts();
        counts.character_substitutions + counts.broken_words + counts.numbers_in_words
    }
}

/// One fix rule that changed the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFix {
    pub pattern: String,
    pub replacement: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrFixOutcome {
    pub text: String,
    /// Only rules with at least one match, in application order
    pub applied: Vec<AppliedFix>,
}

impl OcrFixOutcome {
    pub fn total_fixed(&self) -> usize {
        self.applied.iter().map(|f| f.count).sum()
    }
}

fn matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Collect likely character confusions, split words and digit-letter mixes
pub fn find_ocr_errors(text: &str) -> OcrFindings {
    let character_substitutions = CHAR_CONFUSIONS
        .iter()
        .flat_map(|pattern| matches(pattern, text))
        .collect();

    let numbers_in_words = matches(&DIGIT_LETTER_MIX, text)
        .into_iter()
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .collect();

    OcrFindings {
        character_substitutions,
        broken_words: matches(&BROKEN_WORD, text),
        numbers_in_words,
    }
}

/// Run the fix rules in order, reporting how many instances each one changed
pub fn fix_ocr_errors(text: &str) -> OcrFixOutcome {
    let mut current = text.to_string();
    let mut applied = Vec::new();

    for rule in FIXES.iter() {
        let (fixed, count) = rule.apply(&current);
        if count > 0 {
            log::info!("Fixed {} instances of '{}'", count, rule.pattern.as_str());
            applied.push(AppliedFix {
                pattern: rule.pattern.as_str().to_string(),
                replacement: rule.replacement.to_string(),
                count,
            });
            current = fixed;
        }
    }

    OcrFixOutcome {
        text: current,
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_find_character_substitutions() {
        let findings = find_ocr_errors("lNSTITUTE of 0ptics, rnodern lab");
        assert_eq!(findings.character_substitutions, vec!["lN", "0p", "rno"]);
    }

    #[test]
    fn test_find_broken_words() {
        let findings = find_ocr_errors("The U niversity of E ngineering");
        assert_eq!(findings.broken_words, vec!["U niversity", "E ngineering"]);
    }

    #[test]
    fn test_find_numbers_in_words() {
        let findings = find_ocr_errors("Room 5220 and B2B or 3rd fl00r");
        assert_eq!(findings.numbers_in_words, vec!["B2B", "3rd", "fl00r"]);
        assert_eq!(findings.counts().numbers_in_words, 3);
    }

    #[test]
    fn test_short_leading_word_reads_as_broken() {
        let findings = find_ocr_errors("A plain sentence without trouble.");
        assert_eq!(findings.total(), 1);
        assert_eq!(findings.broken_words, vec!["A plain"]);
        assert!(find_ocr_errors("").character_substitutions.is_empty());
    }

    #[test]
    fn test_fix_abbreviations_and_confusions() {
        let outcome = fix_ocr_errors("PHD and DSC from 0hio in Chicag0");
        assert_eq!(outcome.text, "PhD and DSc from Ohio in Chicago");
        assert_eq!(outcome.total_fixed(), 4);
        assert_eq!(outcome.applied[0].pattern, r"\bPHD\b");
        assert_eq!(outcome.applied[0].count, 1);
    }

    #[test]
    fn test_fix_lowercase_l_before_capital() {
        let outcome = fix_ocr_errors("lTaly and lNdia");
        assert_eq!(outcome.text, "ITaly and INdia");
        assert_eq!(outcome.applied.len(), 1);
        assert_eq!(outcome.applied[0].count, 2);
    }

    #[test]
    fn test_fix_rn_confusion() {
        assert_eq!(fix_ocr_errors("the systern is rnodern").text, "the system is modem");
    }

    #[test]
    fn test_fix_broken_words() {
        let outcome = fix_ocr_errors("U niversity D epartment");
        assert_eq!(outcome.text, "University Department");
        assert_eq!(outcome.applied.len(), 2);
    }

    #[test]
    fn test_fix_reports_nothing_for_clean_text() {
        let outcome = fix_ocr_errors("Clean text stays.");
        assert_eq!(outcome.text, "Clean text stays.");
        assert!(outcome.applied.is_empty());
    }

    proptest! {
        #[test]
        fn prop_text_without_trigger_characters_is_unchanged(text in "[a-k ]{0,60}") {
            let outcome = fix_ocr_errors(&text);
            prop_assert_eq!(outcome.text, text);
            prop_assert!(outcome.applied.is_empty());
        }
    }
}
