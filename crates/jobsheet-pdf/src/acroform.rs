//! Interactive form field tree.

use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId};

use crate::content::{catalog_id, decode_text, name_of, resolve, resolve_dict};
use crate::form::FieldKind;

const MAX_DEPTH: usize = 32;

/// A terminal field: the node that carries the value, and the widget
/// annotations that display it (often the same object).
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub id: ObjectId,
    pub kind: FieldKind,
    pub flags: i64,
    pub widgets: Vec<ObjectId>,
}

pub(crate) fn acroform(doc: &Document) -> Option<&lopdf::Dictionary> {
    let catalog = doc.get_dictionary(catalog_id(doc).ok()?).ok()?;
    resolve_dict(doc, catalog.get(b"AcroForm").ok()?)
}

/// Fully-qualified name → terminal field, for every field reachable from
/// the catalog's `/AcroForm /Fields`.
pub(crate) fn collect_fields(doc: &Document) -> BTreeMap<String, Field> {
    let mut fields = BTreeMap::new();
    let Some(acroform) = acroform(doc) else {
        return fields;
    };
    let Some(Object::Array(roots)) = acroform.get(b"Fields").ok().and_then(|f| resolve(doc, f))
    else {
        return fields;
    };
    for root in roots {
        if let Object::Reference(id) = root {
            walk(doc, *id, "", None, 0, 0, &mut fields);
        }
    }
    fields
}

fn walk(
    doc: &Document,
    id: ObjectId,
    parent_name: &str,
    inherited_type: Option<&[u8]>,
    inherited_flags: i64,
    depth: usize,
    out: &mut BTreeMap<String, Field>,
) {
    if depth > MAX_DEPTH {
        return;
    }
    let Ok(dict) = doc.get_dictionary(id) else {
        return;
    };

    let name = match dict.get(b"T").ok().and_then(decode_text) {
        Some(partial) if parent_name.is_empty() => partial,
        Some(partial) => format!("{parent_name}.{partial}"),
        None => parent_name.to_string(),
    };
    let field_type = dict
        .get(b"FT")
        .ok()
        .and_then(name_of)
        .or(inherited_type);
    let flags = match dict.get(b"Ff") {
        Ok(Object::Integer(ff)) => *ff,
        _ => inherited_flags,
    };

    let kids: Vec<ObjectId> = match dict.get(b"Kids").ok().and_then(|k| resolve(doc, k)) {
        Some(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .collect(),
        _ => Vec::new(),
    };
    let (child_fields, widgets): (Vec<ObjectId>, Vec<ObjectId>) = kids.into_iter().partition(|kid| {
        doc.get_dictionary(*kid)
            .map(|kid| kid.has(b"T"))
            .unwrap_or(false)
    });

    for child in &child_fields {
        walk(doc, *child, &name, field_type, flags, depth + 1, out);
    }

    let terminal = child_fields.is_empty() || !widgets.is_empty();
    if !terminal || name.is_empty() {
        return;
    }
    let Some(kind) = field_type.and_then(|ft| FieldKind::from_pdf(ft, flags)) else {
        return;
    };
    let widgets = if widgets.is_empty() { vec![id] } else { widgets };
    out.insert(
        name,
        Field {
            id,
            kind,
            flags,
            widgets,
        },
    );
}

/// Names of the "on" appearance states of a widget (`/AP /N` keys other
/// than `Off`).
pub(crate) fn on_states(doc: &Document, widget: ObjectId) -> Vec<Vec<u8>> {
    let Some(normal) = doc
        .get_dictionary(widget)
        .ok()
        .and_then(|w| w.get(b"AP").ok())
        .and_then(|ap| resolve_dict(doc, ap))
        .and_then(|ap| ap.get(b"N").ok())
        .and_then(|n| resolve(doc, n))
    else {
        return Vec::new();
    };
    match normal {
        Object::Dictionary(states) => states
            .iter()
            .map(|(state, _)| state.clone())
            .filter(|state| state != b"Off")
            .collect(),
        _ => Vec::new(),
    }
}

/// Export values listed in a button field's `/Opt`, by widget position.
pub(crate) fn export_values(doc: &Document, field: ObjectId) -> Vec<String> {
    match doc
        .get_dictionary(field)
        .ok()
        .and_then(|f| f.get(b"Opt").ok())
        .and_then(|opt| resolve(doc, opt))
    {
        Some(Object::Array(items)) => items
            .iter()
            .map(|item| resolve(doc, item).and_then(decode_text).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}
