//! Small PDFs assembled with lopdf for tests

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

/// One `BT ... ET` block drawing `text` at `(x, y)` with font `F1`
pub fn text_line(size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    text_line_bytes(size, x, y, text.as_bytes().to_vec())
}

/// Like [`text_line`], with the string given as raw font-encoded bytes
pub fn text_line_bytes(size: i64, x: i64, y: i64, bytes: Vec<u8>) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::String(bytes, StringFormat::Hexadecimal)]),
        Operation::new("ET", vec![]),
    ]
}

/// A page that only strokes a line, with no text at all
pub fn graphics_only() -> Vec<Operation> {
    vec![
        Operation::new("m", vec![0.into(), 0.into()]),
        Operation::new("l", vec![100.into(), 100.into()]),
        Operation::new("S", vec![]),
    ]
}

pub struct PdfBuilder {
    base_font: String,
    encoding: Option<String>,
    pages: Vec<Vec<Operation>>,
}

impl PdfBuilder {
    pub fn new(base_font: &str) -> Self {
        Self {
            base_font: base_font.to_string(),
            encoding: None,
            pages: Vec::new(),
        }
    }

    /// Give the font an `/Encoding` name such as `WinAnsiEncoding`
    pub fn encoding(mut self, name: &str) -> Self {
        self.encoding = Some(name.to_string());
        self
    }

    /// Add a page made of text lines
    pub fn page(self, lines: Vec<Vec<Operation>>) -> Self {
        self.raw_page(lines.into_iter().flatten().collect())
    }

    pub fn raw_page(mut self, operations: Vec<Operation>) -> Self {
        self.pages.push(operations);
        self
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut font: Dictionary = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(self.base_font.clone().into_bytes()),
        };
        if let Some(encoding) = &self.encoding {
            font.set("Encoding", Object::Name(encoding.clone().into_bytes()));
        }
        let font_id = doc.add_object(font);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    pub fn write_to(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}
