//! Synthetic fillable templates for tests.
//!
//! The real templates are external assets, so tests build small PDFs with
//! the same field names and kinds. Dotted names become nested fields.

use std::collections::BTreeMap;
use std::path::Path;

use jobsheet_core::models::form_kind::FormKind;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::form::FieldKind;
use crate::mapping::FieldTarget;
use crate::templates::absa::Absa;
use crate::templates::noncompliance::{ISSUE_COUNT, NonCompliance};
use crate::templates::{Template, all_templates};

const WIDGET_WIDTH: f32 = 110.0;
const WIDGET_HEIGHT: f32 = 14.0;

pub fn text(name: &str) -> FieldTarget {
    target(name, FieldKind::Text, &[])
}

pub fn checkbox(name: &str) -> FieldTarget {
    target(name, FieldKind::CheckBox, &[])
}

pub fn radio(name: &str, options: &[&str]) -> FieldTarget {
    target(name, FieldKind::RadioGroup, options)
}

fn target(name: &str, kind: FieldKind, options: &[&str]) -> FieldTarget {
    FieldTarget {
        name: name.to_string(),
        kind,
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

/// Fields a template's synthetic file carries: its expected fields plus the
/// data-dependent ones (grid cells, searched issue boxes).
pub fn template_fields(template: &dyn Template) -> Vec<FieldTarget> {
    let mut fields = template.expected_fields();
    match template.kind() {
        FormKind::Absa => {
            for row in 2..=14 {
                for col in 0..5 {
                    fields.push(checkbox(&format!("Check Box3.{row}.{col}")));
                }
            }
        }
        FormKind::NonCompliance => {
            for n in 1..=ISSUE_COUNT {
                fields.push(checkbox(&format!("n{n}")));
            }
        }
        _ => {}
    }
    fields
}

/// Synthetic ABSA template.
pub fn absa_pdf() -> Vec<u8> {
    fillable_pdf(&template_fields(&Absa))
}

/// Synthetic non-compliance template.
pub fn noncompliance_pdf() -> Vec<u8> {
    fillable_pdf(&template_fields(&NonCompliance))
}

/// Write a synthetic file for every registered template into `dir`.
pub fn write_forms_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for template in all_templates() {
        let bytes = fillable_pdf(&template_fields(template.as_ref()));
        std::fs::write(dir.join(template.file_name()), bytes)?;
    }
    Ok(())
}

/// A single-page PDF without any form.
pub fn plain_pdf() -> Vec<u8> {
    fillable_pdf(&[])
}

/// A single-page PDF with one widget per field, laid out in a grid.
pub fn fillable_pdf(fields: &[FieldTarget]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let on_id = doc.add_object(appearance_stream(b"0 0 1 1 re f".to_vec()));
    let off_id = doc.add_object(appearance_stream(Vec::new()));

    let mut builder = FieldTree {
        doc: &mut doc,
        page_id,
        on_id,
        off_id,
        nodes: BTreeMap::new(),
        roots: Vec::new(),
        annots: Vec::new(),
        slot: 0,
    };
    for field in fields {
        builder.add(field);
    }
    let FieldTree { roots, annots, .. } = builder;

    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        b"0.9 g 0 0 600 800 re f".to_vec(),
    ));
    doc.objects.insert(
        page_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), 600.into(), 800.into()]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Annots", Object::Array(annots)),
        ])),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ])),
    );

    let mut catalog = Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    if !roots.is_empty() {
        catalog.set(
            "AcroForm",
            Dictionary::from_iter([
                ("Fields", Object::Array(roots)),
                ("DA", Object::string_literal("/Helv 0 Tf 0 g")),
                (
                    "DR",
                    Object::Dictionary(Dictionary::from_iter([(
                        "Font",
                        Object::Dictionary(Dictionary::from_iter([(
                            "Helv",
                            Object::Reference(font_id),
                        )])),
                    )])),
                ),
            ]),
        );
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("fixture PDF serializes");
    out
}

fn appearance_stream(content: Vec<u8>) -> Stream {
    Stream::new(
        Dictionary::from_iter([
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Form".to_vec())),
            (
                "BBox",
                Object::Array(vec![0.into(), 0.into(), 1.into(), 1.into()]),
            ),
        ]),
        content,
    )
}

struct FieldTree<'d> {
    doc: &'d mut Document,
    page_id: ObjectId,
    on_id: ObjectId,
    off_id: ObjectId,
    /// Qualified name → non-terminal node.
    nodes: BTreeMap<String, ObjectId>,
    roots: Vec<Object>,
    annots: Vec<Object>,
    slot: usize,
}

impl FieldTree<'_> {
    fn add(&mut self, field: &FieldTarget) {
        let (parent, partial) = match field.name.rsplit_once('.') {
            Some((parent, partial)) => (Some(self.node(parent)), partial),
            None => (None, field.name.as_str()),
        };

        let id = self.doc.new_object_id();
        let mut dict = Dictionary::from_iter([("T", Object::string_literal(partial))]);
        if let Some(parent) = parent {
            dict.set("Parent", Object::Reference(parent));
        }
        match field.kind {
            FieldKind::Text => {
                dict.set("FT", Object::Name(b"Tx".to_vec()));
                dict.set("DA", Object::string_literal("/Helv 0 Tf 0 g"));
                self.widget(&mut dict, id, None);
            }
            FieldKind::CheckBox => {
                dict.set("FT", Object::Name(b"Btn".to_vec()));
                self.widget(&mut dict, id, Some(b"Yes"));
            }
            FieldKind::RadioGroup => {
                dict.set("FT", Object::Name(b"Btn".to_vec()));
                dict.set("Ff", Object::Integer(1 << 15));
                dict.set("V", Object::Name(b"Off".to_vec()));
                let mut kids = Vec::new();
                for option in &field.options {
                    let kid_id = self.doc.new_object_id();
                    let mut kid = Dictionary::from_iter([("Parent", Object::Reference(id))]);
                    self.widget(&mut kid, kid_id, Some(option.as_bytes()));
                    self.doc.objects.insert(kid_id, Object::Dictionary(kid));
                    kids.push(Object::Reference(kid_id));
                }
                dict.set("Kids", Object::Array(kids));
            }
            _ => {
                dict.set("FT", Object::Name(b"Sig".to_vec()));
                self.widget(&mut dict, id, None);
            }
        }
        self.doc.objects.insert(id, Object::Dictionary(dict));
        self.attach(parent, id);
    }

    /// Turn `dict` into a widget annotation at the next grid slot.
    fn widget(&mut self, dict: &mut Dictionary, id: ObjectId, on_state: Option<&[u8]>) {
        let col = (self.slot % 5) as f32;
        let row = ((self.slot / 5) % 52) as f32;
        self.slot += 1;
        let x = 10.0 + col * (WIDGET_WIDTH + 6.0);
        let y = 780.0 - row * (WIDGET_HEIGHT + 1.0);

        dict.set("Type", Object::Name(b"Annot".to_vec()));
        dict.set("Subtype", Object::Name(b"Widget".to_vec()));
        dict.set("P", Object::Reference(self.page_id));
        dict.set(
            "Rect",
            Object::Array(vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(x + WIDGET_WIDTH),
                Object::Real(y + WIDGET_HEIGHT),
            ]),
        );
        if let Some(on) = on_state {
            let states = Dictionary::from_iter([
                (on.to_vec(), Object::Reference(self.on_id)),
                (b"Off".to_vec(), Object::Reference(self.off_id)),
            ]);
            dict.set(
                "AP",
                Dictionary::from_iter([("N", Object::Dictionary(states))]),
            );
            dict.set("AS", Object::Name(b"Off".to_vec()));
        }
        self.annots.push(Object::Reference(id));
    }

    /// Non-terminal node for a qualified name, created on first use.
    fn node(&mut self, name: &str) -> ObjectId {
        if let Some(id) = self.nodes.get(name) {
            return *id;
        }
        let (parent, partial) = match name.rsplit_once('.') {
            Some((parent, partial)) => (Some(self.node(parent)), partial),
            None => (None, name),
        };
        let id = self.doc.add_object(Dictionary::from_iter([
            ("T", Object::String(partial.as_bytes().to_vec(), StringFormat::Literal)),
            ("Kids", Object::Array(Vec::new())),
        ]));
        if let Some(parent) = parent
            && let Ok(Object::Dictionary(dict)) = self.doc.get_object_mut(id)
        {
            dict.set("Parent", Object::Reference(parent));
        }
        self.attach(parent, id);
        self.nodes.insert(name.to_string(), id);
        id
    }

    fn attach(&mut self, parent: Option<ObjectId>, id: ObjectId) {
        match parent {
            None => self.roots.push(Object::Reference(id)),
            Some(parent) => {
                if let Ok(Object::Dictionary(dict)) = self.doc.get_object_mut(parent)
                    && let Ok(Object::Array(kids)) = dict.get_mut(b"Kids")
                {
                    kids.push(Object::Reference(id));
                }
            }
        }
    }
}
