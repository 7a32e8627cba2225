//! Opening PDFs and per-page text extraction.

use std::io::ErrorKind;
use std::path::Path;

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::error::{PdfError, Result};
use crate::layout::{page_spans, spans_to_text};

pub const DEFAULT_MIN_EXTRACTABLE_CHARS: usize = 50;

/// Text of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based page number
    pub page: usize,
    pub text: String,
    pub char_count: usize,
    pub word_count: usize,
}

impl PageRecord {
    pub fn new(page: usize, text: String) -> Self {
        Self {
            page,
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            text,
        }
    }
}

/// Read and parse a PDF, telling missing and unreadable files apart
pub fn open_pdf(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PdfError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => PdfError::PermissionDenied(path.to_path_buf()),
        _ => PdfError::Io(e),
    })?;
    Ok(Document::load_mem(&bytes)?)
}

/// Page text decoded through each font's `/Encoding` or `/ToUnicode` map.
/// Falls back to the raw content-stream walk when lopdf cannot resolve the
/// page's fonts.
fn page_text(doc: &Document, page_number: u32, page_id: lopdf::ObjectId) -> String {
    match doc.extract_text(&[page_number]) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Could not decode text of page {}: {}", page_number, e);
            match page_spans(doc, page_id) {
                Ok(spans) => spans_to_text(&spans),
                Err(e) => {
                    log::warn!("Could not read content of page {}: {}", page_number, e);
                    String::new()
                }
            }
        }
    }
}

/// Extract every page of an open document
pub fn extract_pages(doc: &Document) -> Vec<PageRecord> {
    doc.get_pages()
        .into_iter()
        .map(|(number, page_id)| {
            let record = PageRecord::new(number as usize, page_text(doc, number, page_id));
            log::info!(
                "Page {}: {} characters, {} words",
                record.page,
                record.char_count,
                record.word_count
            );
            record
        })
        .collect()
}

/// Extract the text of every page, or `None` when the file cannot be opened
pub fn extract_text_from_pdf(path: &Path) -> Option<Vec<PageRecord>> {
    log::info!("Opening PDF: {}", path.display());

    let doc = match open_pdf(path) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("{}", e);
            return None;
        }
    };

    let pages = extract_pages(&doc);
    log::info!("Extracted {} pages", pages.len());
    Some(pages)
}

/// Whether the first page carries more than `min_chars` characters of text
pub fn check_pdf_text_extractable(path: &Path, min_chars: usize) -> bool {
    let doc = match open_pdf(path) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Error checking PDF: {}", e);
            return false;
        }
    };

    let Some((&number, &page_id)) = doc.get_pages().iter().next() else {
        log::warn!("{} has no pages", path.display());
        return false;
    };

    let text = page_text(&doc, number, page_id);
    let length = text.trim().chars().count();
    if length > min_chars {
        log::info!("PDF has extractable text ({} characters)", length);
        true
    } else {
        log::warn!("PDF has little or no extractable text ({} characters)", length);
        false
    }
}
