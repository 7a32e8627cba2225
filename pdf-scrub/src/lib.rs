//! pdf-scrub - text extraction, document classification and OCR cleanup for PDFs

pub mod classify;
pub mod cleanup;
pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod ocr;
pub mod pipeline;
pub mod quality;
pub mod structure;

#[cfg(test)]
mod test_support;

pub use classify::{DocumentType, detect_document_type};
pub use cleanup::{clean_academic_document, clean_for_type, clean_legal_document};
pub use config::ScrubConfig;
pub use document::{PageRecord, check_pdf_text_extractable, extract_text_from_pdf};
pub use error::{PdfError, Result};
pub use layout::{LayoutSpan, extract_with_layout};
pub use ocr::{OcrFindings, OcrFixOutcome, find_ocr_errors, fix_ocr_errors};
pub use pipeline::{ProcessedDocument, ProcessingOutcome, process_pdf_complete, process_pdf_with_config};
pub use quality::{QualityReport, VersionComparison, analyze_extraction_quality, compare_versions};
pub use structure::{StructureSummary, analyze_document_structure, analyze_structure_with_ratio};
