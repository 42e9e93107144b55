//! Synthesized single-page documents: the lenient-template summary and the
//! diagnostic test page.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use crate::content::win_ansi;
use crate::document::FlatDocument;
use crate::error::RenderError;

const PAGE_WIDTH: i64 = 600;
const PAGE_HEIGHT: i64 = 800;
const MARGIN_X: i64 = 50;
const TITLE_Y: i64 = 750;
const TITLE_SIZE: i64 = 20;
const FIRST_LINE_Y: i64 = 700;
const LINE_STEP: i64 = 25;
const LINE_SIZE: i64 = 12;
const BOTTOM: i64 = 50;

/// A 600×800 page with a title and one line of Helvetica text per entry.
/// Lines that would fall below the bottom margin are dropped.
pub fn text_page(title: &str, lines: &[String]) -> Result<FlatDocument, RenderError> {
    let mut operations = Vec::new();
    show_text(&mut operations, title, TITLE_SIZE, TITLE_Y);
    let mut y = FIRST_LINE_Y;
    for line in lines {
        if y <= BOTTOM {
            break;
        }
        show_text(&mut operations, line, LINE_SIZE, y);
        y -= LINE_STEP;
    }
    let content = Content { operations }.encode()?;

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));
    let resources = Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]);
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
    let page_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
        (
            "MediaBox",
            Object::Array(vec![
                0.into(),
                0.into(),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ]),
        ),
    ]));
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(FlatDocument::from_document(doc))
}

/// Summary page listing `label: value` for every entry.
pub fn summary_document(
    title: &str,
    entries: &[(String, String)],
) -> Result<FlatDocument, RenderError> {
    let lines: Vec<String> = entries
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    text_page(title, &lines)
}

/// Page proving the PDF pipeline works without any template.
pub fn test_document(generated_at: &str) -> Result<FlatDocument, RenderError> {
    text_page(
        "Test PDF Generation",
        &[format!("Generated at: {generated_at}")],
    )
}

fn show_text(operations: &mut Vec<Operation>, text: &str, size: i64, y: i64) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    operations.push(Operation::new("Td", vec![MARGIN_X.into(), y.into()]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}
