use serde::{Deserialize, Serialize};
use std::fmt;

const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "course",
    "credit",
    "prerequisite",
    "professor",
    "department",
];

const LEGAL_KEYWORDS: &[&str] = &["county", "state of", "notary", "acknowledged", "sworn", "witness"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Academic,
    Legal,
    General,
    Unknown,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentType::Academic => "academic",
            DocumentType::Legal => "legal",
            DocumentType::General => "general",
            DocumentType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Number of keywords that occur at least once (case-insensitive substring match)
fn keyword_score(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Classify by keyword overlap; ties are `General`, empty text is `Unknown`
pub fn detect_document_type(text: &str) -> DocumentType {
    if text.is_empty() {
        return DocumentType::Unknown;
    }

    let lower = text.to_lowercase();
    let academic = keyword_score(&lower, ACADEMIC_KEYWORDS);
    let legal = keyword_score(&lower, LEGAL_KEYWORDS);
    log::debug!("Keyword scores: academic {}, legal {}", academic, legal);

    match academic.cmp(&legal) {
        std::cmp::Ordering::Greater => DocumentType::Academic,
        std::cmp::Ordering::Less => DocumentType::Legal,
        std::cmp::Ordering::Equal => DocumentType::General,
    }
}
