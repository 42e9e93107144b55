//! Form model and flattening over real PDF bytes.

use jobsheet_pdf::document::RasterImage;
use jobsheet_pdf::fixtures::{checkbox, fillable_pdf, plain_pdf, radio, text};
use jobsheet_pdf::{FieldKind, FillableDocument, Form, RenderError};
use lopdf::{Document, Object};

fn sample() -> FillableDocument {
    let bytes = fillable_pdf(&[
        text("CName"),
        text("Claim no"),
        checkbox("Quote_Y"),
        checkbox("Check Box3.2.0"),
        checkbox("Check Box3.2.1"),
        radio("Group1", &["Choice1", "Choice2"]),
    ]);
    FillableDocument::load(&bytes).unwrap()
}

/// Every stream of a serialized document, decompressed, as text.
fn stream_text(bytes: &[u8]) -> String {
    let mut doc = Document::load_mem(bytes).unwrap();
    doc.decompress();
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            Object::Stream(stream) => Some(String::from_utf8_lossy(&stream.content).into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn hex(value: &str) -> String {
    let encoded: String = value.bytes().map(|b| format!("{b:02X}")).collect();
    format!("<{encoded}>")
}

fn has_widgets(doc: &Document) -> bool {
    doc.objects.values().any(|obj| match obj {
        Object::Dictionary(dict) => {
            matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Widget")
        }
        _ => false,
    })
}

#[test]
fn enumerates_fully_qualified_names_and_kinds() {
    let doc = sample();
    assert_eq!(
        doc.field_names(),
        vec![
            "CName",
            "Check Box3.2.0",
            "Check Box3.2.1",
            "Claim no",
            "Group1",
            "Quote_Y",
        ]
    );
    assert_eq!(doc.field_kind("CName"), Some(FieldKind::Text));
    assert_eq!(doc.field_kind("Check Box3.2.1"), Some(FieldKind::CheckBox));
    assert_eq!(doc.field_kind("Group1"), Some(FieldKind::RadioGroup));
    assert!(doc.has_field("Claim no"));
    assert!(!doc.has_field("Check Box3"));
    assert!(!doc.has_field("Missing"));
}

#[test]
fn writes_and_reads_values() {
    let mut doc = sample();
    doc.set_text("CName", "Zoë Ndlovu").unwrap();
    doc.set_text("Claim no", "Ref → 7").unwrap();
    doc.check("Check Box3.2.1").unwrap();
    doc.select("Group1", "Choice2").unwrap();

    assert_eq!(doc.text_value("CName").as_deref(), Some("Zoë Ndlovu"));
    assert_eq!(doc.text_value("Claim no").as_deref(), Some("Ref → 7"));
    assert!(doc.is_checked("Check Box3.2.1"));
    assert!(!doc.is_checked("Check Box3.2.0"));
    assert_eq!(doc.selected("Group1").as_deref(), Some("Choice2"));
}

#[test]
fn reports_missing_fields_kind_mismatches_and_bad_options() {
    let mut doc = sample();
    assert!(matches!(
        doc.set_text("Nope", "x"),
        Err(RenderError::FieldNotFound(name)) if name == "Nope"
    ));
    assert!(matches!(
        doc.set_text("Quote_Y", "x"),
        Err(RenderError::FieldKindMismatch {
            expected: FieldKind::Text,
            actual: FieldKind::CheckBox,
            ..
        })
    ));
    assert!(matches!(
        doc.check("CName"),
        Err(RenderError::FieldKindMismatch { .. })
    ));
    assert!(matches!(
        doc.select("Group1", "Choice9"),
        Err(RenderError::InvalidOption { .. })
    ));
}

#[test]
fn flatten_removes_the_form_and_draws_values() {
    let mut doc = sample();
    doc.set_text("CName", "Claire Botha").unwrap();
    doc.check("Quote_Y").unwrap();
    doc.select("Group1", "Choice1").unwrap();

    let bytes = doc.flatten().unwrap().to_bytes().unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let flat = Document::load_mem(&bytes).unwrap();
    let catalog = flat
        .get_dictionary(flat.trailer.get(b"Root").unwrap().as_reference().unwrap())
        .unwrap();
    assert!(!catalog.has(b"AcroForm"));
    assert!(!has_widgets(&flat));
    assert_eq!(flat.get_pages().len(), 1);

    let content = stream_text(&bytes);
    assert!(content.contains(&hex("Claire Botha")));
    assert!(content.contains("/Helv"));

    let reloaded = FillableDocument::load(&bytes).unwrap();
    assert!(!reloaded.has_form());
}

#[test]
fn check_mark_is_drawn_with_zapf_dingbats() {
    let mut doc = FillableDocument::load(&fillable_pdf(&[text("Geyser_Kwikot")])).unwrap();
    doc.set_text("Geyser_Kwikot", "✔").unwrap();
    let bytes = doc.flatten().unwrap().to_bytes().unwrap();

    let content = stream_text(&bytes);
    assert!(content.contains("/ZaDb"));
    assert!(content.contains("<34> Tj"));
}

#[test]
fn images_are_drawn_with_a_soft_mask() {
    let mut doc = sample();
    let image = RasterImage {
        width: 2,
        height: 1,
        rgb: vec![0, 0, 0, 255, 255, 255],
        alpha: vec![255, 0],
    };
    doc.draw_image(1, &image, 400.0, 100.0, 20.0, 10.0).unwrap();
    assert!(matches!(
        doc.draw_image(2, &image, 0.0, 0.0, 1.0, 1.0),
        Err(RenderError::Pdf(_))
    ));

    let bytes = doc.flatten().unwrap().to_bytes().unwrap();
    let flat = Document::load_mem(&bytes).unwrap();
    let images: Vec<_> = flat
        .objects
        .values()
        .filter_map(|obj| match obj {
            Object::Stream(s) => match s.dict.get(b"Subtype") {
                Ok(Object::Name(name)) if name == b"Image" => Some(s),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(images.len(), 2);
    assert!(images.iter().any(|s| s.dict.has(b"SMask")));
    assert!(stream_text(&bytes).contains("20 0 0 10 400 100 cm"));
}

#[test]
fn documents_without_a_form_have_no_fields() {
    let doc = FillableDocument::load(&plain_pdf()).unwrap();
    assert!(!doc.has_form());
    assert!(doc.field_names().is_empty());
    assert_eq!(doc.page_count(), 1);
}

#[test]
fn garbage_is_rejected() {
    assert!(FillableDocument::load(b"not a pdf").is_err());
}
