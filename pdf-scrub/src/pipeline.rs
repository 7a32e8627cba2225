//! End-to-end processing of one PDF: extract, classify, clean, fix, compare, write.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{DocumentType, detect_document_type};
use crate::cleanup::clean_for_type;
use crate::config::ScrubConfig;
use crate::document::{extract_pages, open_pdf};
use crate::layout::page_spans;
use crate::ocr::{AppliedFix, OcrFindings, find_ocr_errors, fix_ocr_errors};
use crate::quality::{VersionComparison, compare_versions};
use crate::structure::{DEFAULT_HEADER_SIZE_RATIO, StructureSummary, analyze_structure_with_ratio};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub source: PathBuf,
    pub document_type: DocumentType,
    pub pages_processed: usize,
    pub original_text: String,
    pub cleaned_text: String,
    pub fixed_text: String,
    /// Findings on the cleaned text, before fixes were applied
    pub findings: OcrFindings,
    pub fixes: Vec<AppliedFix>,
    pub comparison: VersionComparison,
    /// Font statistics of the first page
    pub structure: Option<StructureSummary>,
    pub output_file: PathBuf,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Processed(ProcessedDocument),
    Failed { error: String },
}

impl ProcessingOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, ProcessingOutcome::Processed(_))
    }

    fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        log::error!("{}", error);
        ProcessingOutcome::Failed { error }
    }
}

/// `<output_dir>/<stem>_processed.txt`
pub fn output_file_for(path: &Path, output_dir: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}_processed.txt", stem))
}

/// Process with the default header ratio
pub fn process_pdf_complete(path: &Path, output_dir: &Path) -> ProcessingOutcome {
    process_pdf(path, output_dir, DEFAULT_HEADER_SIZE_RATIO)
}

/// Process using the output directory and header ratio from `config`
pub fn process_pdf_with_config(path: &Path, config: &ScrubConfig) -> ProcessingOutcome {
    process_pdf(path, &config.output_dir, config.header_size_ratio)
}

fn process_pdf(path: &Path, output_dir: &Path, header_ratio: f32) -> ProcessingOutcome {
    log::info!("Processing {}", path.display());

    let doc = match open_pdf(path) {
        Ok(doc) => doc,
        Err(e) => return ProcessingOutcome::failed(format!("Could not open {}: {}", path.display(), e)),
    };

    let pages = extract_pages(&doc);
    if !pages.iter().any(|p| !p.text.trim().is_empty()) {
        return ProcessingOutcome::failed(format!(
            "No extractable text in {}; possibly a scanned or image-based PDF",
            path.display()
        ));
    }

    let original_text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let structure = doc
        .get_pages()
        .values()
        .next()
        .and_then(|&page_id| page_spans(&doc, page_id).ok())
        .and_then(|spans| analyze_structure_with_ratio(&spans, header_ratio));

    let document_type = detect_document_type(&original_text);
    log::info!("Document detected as: {}", document_type);
    let cleaned_text = clean_for_type(&original_text, document_type);

    let findings = find_ocr_errors(&cleaned_text);
    let counts = findings.counts();
    log::info!(
        "Potential issues: {} character substitutions, {} broken words, {} numbers in words",
        counts.character_substitutions,
        counts.broken_words,
        counts.numbers_in_words
    );
    let fix = fix_ocr_errors(&cleaned_text);
    let comparison = compare_versions(&original_text, &cleaned_text, &fix.text);

    let output_file = output_file_for(path, output_dir);
    if let Err(e) = std::fs::create_dir_all(output_dir).and_then(|_| std::fs::write(&output_file, &fix.text)) {
        return ProcessingOutcome::failed(format!("Could not write {}: {}", output_file.display(), e));
    }
    log::info!("Saved: {}", output_file.display());

    ProcessingOutcome::Processed(ProcessedDocument {
        source: path.to_path_buf(),
        document_type,
        pages_processed: pages.len(),
        original_text,
        cleaned_text,
        fixed_text: fix.text,
        findings,
        fixes: fix.applied,
        comparison,
        structure,
        output_file,
        processed_at: Utc::now(),
    })
}
