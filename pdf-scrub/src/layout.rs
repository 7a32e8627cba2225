//! Text spans with position and font information, read from page content streams.
//!
//! Coordinates are in PDF user space (origin bottom-left). Span widths are
//! estimated from the character count since glyph metrics are not consulted.

use std::collections::HashMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};

use crate::document::open_pdf;
use crate::error::{PdfError, Result};

pub const FLAG_SUPERSCRIPT: u32 = 1;
pub const FLAG_ITALIC: u32 = 2;
pub const FLAG_SERIF: u32 = 4;
pub const FLAG_MONOSPACE: u32 = 8;
pub const FLAG_BOLD: u32 = 16;

/// Average glyph width as a fraction of the font size
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// TJ adjustments below this (thousandths of an em) read as a word gap
const TJ_SPACE_THRESHOLD: f32 = -250.0;

const MAX_PARENT_DEPTH: usize = 32;

/// One run of text drawn with a single font and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    pub text: String,
    /// `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    pub font: String,
    pub size: f32,
    pub flags: u32,
}

impl LayoutSpan {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Style flags implied by a font's base name
pub fn font_flags(font: &str) -> u32 {
    let name = font.to_ascii_lowercase();
    let mut flags = 0;

    if name.contains("bold") || name.contains("black") || name.contains("heavy") {
        flags |= FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    let monospace = name.contains("courier") || name.contains("mono") || name.contains("consol");
    if monospace {
        flags |= FLAG_MONOSPACE;
    } else if !name.contains("sans")
        && ["times", "serif", "roman", "georgia", "garamond"]
            .iter()
            .any(|s| name.contains(s))
    {
        flags |= FLAG_SERIF;
    }

    flags
}

/// Drop a subset tag such as `ABCDEF+` from a base font name
fn strip_subset_tag(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// Decode a PDF string operand: UTF-16BE with a byte-order mark, otherwise Latin-1
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

fn resolve_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    doc.dereference(object)
        .ok()
        .and_then(|(_, resolved)| resolved.as_dict().ok())
}

/// Map resource font keys (`F1`) to base font names, honouring inherited resources
fn page_fonts(doc: &Document, page_id: ObjectId) -> HashMap<Vec<u8>, String> {
    let mut fonts = HashMap::new();
    let mut node = doc.get_dictionary(page_id).ok();

    for _ in 0..MAX_PARENT_DEPTH {
        let Some(dict) = node else { break };

        if let Some(resources) = dict.get(b"Resources").ok().and_then(|r| resolve_dict(doc, r)) {
            if let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve_dict(doc, f)) {
                for (key, value) in font_dict.iter() {
                    let base = resolve_dict(doc, value)
                        .and_then(|font| font.get(b"BaseFont").ok())
                        .and_then(|name| name.as_name().ok())
                        .map(|name| String::from_utf8_lossy(name).into_owned())
                        .unwrap_or_else(|| String::from_utf8_lossy(key).into_owned());
                    fonts.insert(key.clone(), strip_subset_tag(&base).to_string());
                }
            }
            break;
        }

        node = dict
            .get(b"Parent")
            .ok()
            .and_then(|parent| parent.as_reference().ok())
            .and_then(|id| doc.get_dictionary(id).ok());
    }

    fonts
}

fn number(operands: &[Object], index: usize) -> Option<f32> {
    operands.get(index)?.as_float().ok()
}

/// Text state tracked while walking one page's operators
struct TextWalker<'a> {
    fonts: &'a HashMap<Vec<u8>, String>,
    font: String,
    font_size: f32,
    scale: f32,
    leading: f32,
    rise: f32,
    line_origin: (f32, f32),
    position: (f32, f32),
    spans: Vec<LayoutSpan>,
}

impl<'a> TextWalker<'a> {
    fn new(fonts: &'a HashMap<Vec<u8>, String>) -> Self {
        Self {
            fonts,
            font: String::new(),
            font_size: 0.0,
            scale: 1.0,
            leading: 0.0,
            rise: 0.0,
            line_origin: (0.0, 0.0),
            position: (0.0, 0.0),
            spans: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_origin = (self.line_origin.0 + tx, self.line_origin.1 + ty);
        self.position = self.line_origin;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn apply(&mut self, operation: &Operation) {
        let ops = &operation.operands;
        match operation.operator.as_str() {
            "BT" => {
                self.line_origin = (0.0, 0.0);
                self.position = (0.0, 0.0);
                self.scale = 1.0;
            }
            "Tf" => {
                if let Some(name) = ops.first().and_then(|o| o.as_name().ok()) {
                    self.font = self
                        .fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                }
                if let Some(size) = number(ops, 1) {
                    self.font_size = size;
                }
            }
            "TL" => self.leading = number(ops, 0).unwrap_or(self.leading),
            "Ts" => self.rise = number(ops, 0).unwrap_or(0.0),
            "Td" | "TD" => {
                let (tx, ty) = (number(ops, 0).unwrap_or(0.0), number(ops, 1).unwrap_or(0.0));
                if operation.operator == "TD" {
                    self.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let [_, _, Some(c), Some(d), Some(e), Some(f)] =
                    [0, 1, 2, 3, 4, 5].map(|i| number(ops, i))
                {
                    let scale = (c * c + d * d).sqrt();
                    self.scale = if scale > 0.0 { scale } else { 1.0 };
                    self.line_origin = (e, f);
                    self.position = (e, f);
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = ops.first() {
                    self.show(decode_pdf_string(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = ops.first() {
                    self.show(join_tj_array(items));
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = ops.first() {
                    self.show(decode_pdf_string(bytes));
                }
            }
            "\"" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = ops.get(2) {
                    self.show(decode_pdf_string(bytes));
                }
            }
            _ => {}
        }
    }

    fn show(&mut self, text: String) {
        if text.is_empty() {
            return;
        }

        let size = self.font_size * self.scale;
        let width = text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO;
        let (x0, y0) = (self.position.0, self.position.1 + self.rise);

        let mut flags = font_flags(&self.font);
        if self.rise > 0.0 {
            flags |= FLAG_SUPERSCRIPT;
        }

        self.spans.push(LayoutSpan {
            text,
            bbox: [x0, y0, x0 + width, y0 + size],
            font: self.font.clone(),
            size,
            flags,
        });
        self.position.0 += width;
    }
}

fn join_tj_array(items: &[Object]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
            Object::Integer(_) | Object::Real(_) => {
                let adjust = item.as_float().unwrap_or(0.0);
                if adjust < TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    text
}

/// All text spans drawn by one page, in content-stream order
pub(crate) fn page_spans(doc: &Document, page_id: ObjectId) -> Result<Vec<LayoutSpan>> {
    let fonts = page_fonts(doc, page_id);
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut walker = TextWalker::new(&fonts);
    for operation in &content.operations {
        walker.apply(operation);
    }
    Ok(walker.spans)
}

/// Flatten spans into page text: one output line per baseline
pub(crate) fn spans_to_text(spans: &[LayoutSpan]) -> String {
    let mut text = String::new();
    let mut previous: Option<&LayoutSpan> = None;

    for span in spans {
        if let Some(prev) = previous {
            let tolerance = prev.size.max(span.size) * 0.5;
            if (prev.bbox[1] - span.bbox[1]).abs() > tolerance {
                text.push('\n');
            } else if (span.bbox[0] - prev.bbox[2]).abs() > span.size * 0.1
                && !text.ends_with(char::is_whitespace)
                && !span.text.starts_with(char::is_whitespace)
            {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
        previous = Some(span);
    }

    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn layout_for_page(path: &Path, page_index: usize) -> Result<Vec<LayoutSpan>> {
    let doc = open_pdf(path)?;
    let pages = doc.get_pages();
    let page_id = *pages
        .values()
        .nth(page_index)
        .ok_or(PdfError::PageOutOfRange {
            index: page_index,
            count: pages.len(),
        })?;
    page_spans(&doc, page_id)
}

/// Text spans of one page (0-based), or `None` when the file cannot be read
pub fn extract_with_layout(path: &Path, page_index: usize) -> Option<Vec<LayoutSpan>> {
    match layout_for_page(path, page_index) {
        Ok(spans) => {
            log::debug!("Page {}: {} spans", page_index + 1, spans.len());
            Some(spans)
        }
        Err(e) => {
            log::error!("Error extracting layout from {}: {}", path.display(), e);
            None
        }
    }
}
