//! Low-level helpers over `lopdf` objects: reference resolution, PDF text
//! strings, page resources and page content streams.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::RenderError;

/// Follow one level of indirection.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

pub(crate) fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, obj)? {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f as f32),
        _ => None,
    }
}

pub(crate) fn name_of(obj: &Object) -> Option<&[u8]> {
    match obj {
        Object::Name(name) => Some(name),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, UTF-8 with BOM, otherwise
/// single-byte.
pub(crate) fn decode_text(obj: &Object) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return Some(
            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect(),
        );
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return Some(String::from_utf8_lossy(rest).into_owned());
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// Encode a PDF text string, single-byte when every character fits.
pub(crate) fn encode_text(value: &str) -> Object {
    if value.chars().all(|c| (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32))) {
        let bytes = value.chars().map(|c| c as u8).collect();
        return Object::String(bytes, StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// WinAnsiEncoding bytes for the standard Helvetica font. Characters outside
/// the encoding become `?`, control characters become spaces.
pub(crate) fn win_ansi(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            0x00..=0x1F => b' ',
            _ => match c {
                '€' => 0x80,
                '‚' => 0x82,
                '„' => 0x84,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '™' => 0x99,
                _ => b'?',
            },
        })
        .collect()
}

/// Format a number for a content stream.
pub(crate) fn num(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 2);
    out.push('<');
    for b in bytes {
        out.push_str(&format!("{b:02X}"));
    }
    out.push('>');
    out
}

pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId, RenderError> {
    Ok(doc.trailer.get(b"Root")?.as_reference()?)
}

pub(crate) fn dict_mut(doc: &mut Document, id: ObjectId) -> Result<&mut Dictionary, RenderError> {
    Ok(doc.get_object_mut(id).and_then(|o| o.as_dict_mut())?)
}

/// Resources of a page with inheritance resolved, and with the `XObject` and
/// `Font` sub-dictionaries inlined so they can be extended.
fn resolved_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    let mut current = Some(page_id);
    let mut depth = 0;
    while let Some(id) = current {
        depth += 1;
        let Ok(dict) = doc.get_dictionary(id) else {
            break;
        };
        if let Some(resources) = dict
            .get(b"Resources")
            .ok()
            .and_then(|obj| resolve_dict(doc, obj))
        {
            let mut resources = resources.clone();
            for key in [b"XObject".as_slice(), b"Font".as_slice()] {
                let target = match resources.get(key) {
                    Ok(Object::Reference(sub)) => Some(*sub),
                    _ => None,
                };
                if let Some(sub) = target.and_then(|sub| doc.get_dictionary(sub).ok()) {
                    resources.set(key, Object::Dictionary(sub.clone()));
                }
            }
            return resources;
        }
        if depth > 32 {
            break;
        }
        current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    Dictionary::new()
}

/// Register an XObject under `name` in the page's own resources.
pub(crate) fn register_xobject(
    doc: &mut Document,
    page_id: ObjectId,
    name: &str,
    target: ObjectId,
) -> Result<(), RenderError> {
    let mut resources = resolved_resources(doc, page_id);
    let mut xobjects = match resources.remove(b"XObject") {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };
    xobjects.set(name, Object::Reference(target));
    resources.set("XObject", xobjects);
    dict_mut(doc, page_id)?.set("Resources", resources);
    Ok(())
}

/// Wrap the existing page content in `q`/`Q` and append `ops` after it, so
/// the appended drawing starts from the default graphics state.
pub(crate) fn append_isolated(
    doc: &mut Document,
    page_id: ObjectId,
    ops: Vec<u8>,
) -> Result<(), RenderError> {
    let existing: Vec<Object> = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let open = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let mut tail = b"\nQ\n".to_vec();
    tail.extend(ops);
    let close = doc.add_object(Stream::new(Dictionary::new(), tail));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open));
    contents.extend(existing);
    contents.push(Object::Reference(close));
    dict_mut(doc, page_id)?.set("Contents", contents);
    Ok(())
}

/// Standard Type1 font dictionaries used by generated appearances.
pub(crate) fn standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", "Font");
    font.set("Subtype", "Type1");
    font.set("BaseFont", base_font);
    if base_font != "ZapfDingbats" {
        font.set("Encoding", "WinAnsiEncoding");
    }
    doc.add_object(font)
}
