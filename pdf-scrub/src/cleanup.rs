//! Ordered regex substitution tables for academic and legal documents.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::DocumentType;

/// A named regex replacement, applied with `replace_all`
#[derive(Debug)]
pub struct Substitution {
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl Substitution {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("substitution patterns are valid"),
            replacement,
        }
    }

    /// Apply the rule, returning the new text and the number of matches replaced
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (self.pattern.replace_all(text, self.replacement).into_owned(), count)
    }
}

pub(crate) fn table(rules: &[(&str, &'static str)]) -> Vec<Substitution> {
    rules
        .iter()
        .map(|(pattern, replacement)| Substitution::new(pattern, replacement))
        .collect()
}

static ACADEMIC_RULES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    table(&[
        // URLs
        (r"https?://[^\s]+", "[URL]"),
        // Course codes: "CMPE 5220." -> "CMPE 5220: "
        (r"([A-Z]{2,4}\s+\d{4})\.\s*", "${1}: "),
        (r"(\d+)\s+Credits?\.\s*", "${1} Credits. "),
        // Faculty lists split across lines
        (r"([A-Z][a-z]+),\s*([A-Z][a-z]+);\s*", "${1}, ${2}; "),
        (r"\n\s*\n\s*\n+", "\n\n"),
        (r" +", " "),
    ])
});

static LEGAL_RULES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    table(&[
        (r"STATE\s+OF\s+([A-Z]+)\s*\)", "STATE OF ${1})"),
        (r"\)\s*\n\s*\)\s*ss:", ")\n) ss:"),
        (
            r"(\d{1,2})\w*\s+day\s+of\s+([A-Z][a-z]+)\s*,?\s*(\d{4})",
            "${1} day of ${2}, ${3}",
        ),
        (r"\[Signature\]", "[SIGNATURE]"),
        (r"Page\s+(\d+)\s+of\s+(\d+)", "Page ${1} of ${2}"),
    ])
});

fn apply_all(text: &str, rules: &[Substitution]) -> String {
    let cleaned = rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc).0);
    cleaned.trim().to_string()
}

/// Redact URLs, normalise course codes, credits and faculty lists, collapse blank space
pub fn clean_academic_document(text: &str) -> String {
    log::info!("Applying academic document cleaning");
    apply_all(text, &ACADEMIC_RULES)
}

/// Normalise venue headers, `ss:` lines, dates, signatures and page references
pub fn clean_legal_document(text: &str) -> String {
    log::info!("Applying legal document cleaning");
    apply_all(text, &LEGAL_RULES)
}

/// Clean with the table for `doc_type`; other types pass through unchanged
pub fn clean_for_type(text: &str, doc_type: DocumentType) -> String {
    match doc_type {
        DocumentType::Academic => clean_academic_document(text),
        DocumentType::Legal => clean_legal_document(text),
        DocumentType::General | DocumentType::Unknown => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_counts_matches() {
        let rule = Substitution::new(r"\d", "#");
        assert_eq!(rule.apply("a1b22"), ("a#b##".to_string(), 3));
        assert_eq!(rule.apply("none"), ("none".to_string(), 0));
    }

    #[test]
    fn test_academic_urls_redacted() {
        let text = "See https://catalog.example.edu/cmpe for details.";
        assert_eq!(clean_academic_document(text), "See [URL] for details.");
    }

    #[test]
    fn test_academic_course_code_and_credits() {
        let text = "CMPE 5220.  Machine Learning. 3   Credits.Covers models.";
        assert_eq!(
            clean_academic_document(text),
            "CMPE 5220: Machine Learning. 3 Credits. Covers models."
        );
    }

    #[test]
    fn test_academic_faculty_names() {
        assert_eq!(clean_academic_document("Smith,John;Doe, Jane;"), "Smith, John; Doe, Jane;");
    }

    #[test]
    fn test_academic_blank_lines_collapsed() {
        let text = "  Intro\n\n\n\nBody   text  \n";
        assert_eq!(clean_academic_document(text), "Intro\n\nBody text");
    }

    #[test]
    fn test_legal_state_and_ss() {
        let text = "STATE  OF   OHIO   )\n  )  ss:";
        assert_eq!(clean_legal_document(text), "STATE OF OHIO)\n) ss:");
    }

    #[test]
    fn test_legal_dates_signatures_pages() {
        let text = "on this 21st day   of May 2020 [Signature] Page  3  of  10";
        assert_eq!(
            clean_legal_document(text),
            "on this 21 day of May, 2020 [SIGNATURE] Page 3 of 10"
        );
    }

    #[test]
    fn test_clean_for_type_general_passthrough() {
        let text = "  keep   me  ";
        assert_eq!(clean_for_type(text, DocumentType::General), text);
        assert_eq!(clean_for_type(text, DocumentType::Academic), "keep me");
    }
}
