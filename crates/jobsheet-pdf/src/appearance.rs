//! Widget appearances used when flattening.
//!
//! Text fields get a freshly generated appearance from their value, so the
//! flattened page shows what was written regardless of what the template
//! shipped with. Buttons keep the appearance stream of their current state.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::content::{decode_text, hex, num, number, resolve, resolve_dict, win_ansi};

pub(crate) const HELVETICA: &str = "Helv";
pub(crate) const ZAPF_DINGBATS: &str = "ZaDb";

/// The check mark that is drawn with ZapfDingbats instead of Helvetica.
pub(crate) const CHECK_MARK: &str = "✔";
const CHECK_MARK_GLYPH: u8 = b'4';

const MULTILINE: i64 = 1 << 12;
const DEFAULT_FONT_SIZE: f32 = 12.0;
const MIN_FONT_SIZE: f32 = 4.0;
const PADDING: f32 = 2.0;
const AVERAGE_GLYPH_WIDTH: f32 = 0.52;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub(crate) fn from_object(doc: &Document, obj: &Object) -> Option<Self> {
        let Object::Array(items) = resolve(doc, obj)? else {
            return None;
        };
        if items.len() != 4 {
            return None;
        }
        let coords: Vec<f32> = items
            .iter()
            .filter_map(|item| resolve(doc, item).and_then(number))
            .collect();
        let [x1, y1, x2, y2] = coords[..] else {
            return None;
        };
        Some(Rect {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        })
    }
}

pub(crate) enum Appearance {
    Existing(ObjectId),
    Inline(Stream),
}

/// The normal appearance a widget currently shows: the `/AP /N` stream,
/// or the entry for its `/AS` state when `/N` is a state dictionary.
pub(crate) fn current_appearance(doc: &Document, widget: ObjectId) -> Option<Appearance> {
    let dict = doc.get_dictionary(widget).ok()?;
    let ap = resolve_dict(doc, dict.get(b"AP").ok()?)?;
    let normal = ap.get(b"N").ok()?;
    let (normal_id, normal_obj) = match normal {
        Object::Reference(id) => (Some(*id), doc.get_object(*id).ok()?),
        other => (None, other),
    };
    match normal_obj {
        Object::Stream(stream) => Some(match normal_id {
            Some(id) => Appearance::Existing(id),
            None => Appearance::Inline(stream.clone()),
        }),
        Object::Dictionary(states) => {
            let Ok(Object::Name(state)) = dict.get(b"AS") else {
                return None;
            };
            match states.get(state).ok()? {
                Object::Reference(id) => Some(Appearance::Existing(*id)),
                Object::Stream(stream) => Some(Appearance::Inline(stream.clone())),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `[x1 y1 x2 y2]` of a form XObject's `/BBox`, defaulting to the unit
/// square.
pub(crate) fn bbox(doc: &Document, stream: ObjectId) -> (f32, f32, f32, f32) {
    let rect = doc
        .get_object(stream)
        .ok()
        .and_then(|obj| match obj {
            Object::Stream(s) => s.dict.get(b"BBox").ok(),
            _ => None,
        })
        .and_then(|bbox| Rect::from_object(doc, bbox));
    match rect {
        Some(r) if r.width > 0.0 && r.height > 0.0 => (r.x, r.y, r.x + r.width, r.y + r.height),
        _ => (0.0, 0.0, 1.0, 1.0),
    }
}

/// Inherited text attributes of a text field widget.
pub(crate) struct TextStyle {
    pub font_size: Option<f32>,
    pub quadding: i64,
    pub multiline: bool,
}

impl TextStyle {
    /// Reads `/DA` and `/Q` from the widget, then the field, then the
    /// AcroForm defaults.
    pub(crate) fn lookup(
        doc: &Document,
        widget: ObjectId,
        field: ObjectId,
        flags: i64,
        defaults: Option<&Dictionary>,
    ) -> Self {
        let sources: Vec<&Dictionary> = [widget, field]
            .into_iter()
            .filter_map(|id| doc.get_dictionary(id).ok())
            .chain(defaults)
            .collect();

        let font_size = sources
            .iter()
            .find_map(|dict| dict.get(b"DA").ok().and_then(decode_text))
            .and_then(|da| font_size_of(&da))
            .filter(|size| *size > 0.0);
        let quadding = sources
            .iter()
            .find_map(|dict| match dict.get(b"Q") {
                Ok(Object::Integer(q)) => Some(*q),
                _ => None,
            })
            .unwrap_or(0);

        TextStyle {
            font_size,
            quadding,
            multiline: flags & MULTILINE != 0,
        }
    }
}

/// Size operand of the `Tf` operator in a default appearance string
/// (`/Helv 10 Tf 0 g`).
fn font_size_of(da: &str) -> Option<f32> {
    let tokens: Vec<&str> = da.split_whitespace().collect();
    let tf = tokens.iter().position(|t| *t == "Tf")?;
    tokens.get(tf.checked_sub(1)?)?.parse().ok()
}

/// A form XObject showing `value` inside a widget of the given size.
pub(crate) fn text_appearance(
    value: &str,
    rect: Rect,
    style: &TextStyle,
    fonts: (ObjectId, ObjectId),
) -> Stream {
    let (helvetica, zapf) = fonts;
    let (font, glyphs, glyph_width) = if value == CHECK_MARK {
        (ZAPF_DINGBATS, vec![CHECK_MARK_GLYPH], 0.846)
    } else {
        (HELVETICA, Vec::new(), AVERAGE_GLYPH_WIDTH)
    };

    let inner_width = (rect.width - 2.0 * PADDING).max(1.0);
    let lines: Vec<Vec<u8>> = if !glyphs.is_empty() {
        vec![glyphs]
    } else if style.multiline {
        let size = style.font_size.unwrap_or(10.0);
        let max_chars = ((inner_width / (size * glyph_width)) as usize).max(1);
        value
            .lines()
            .flat_map(|line| wrap(line, max_chars))
            .map(|line| win_ansi(&line))
            .collect()
    } else {
        vec![win_ansi(&value.replace(['\r', '\n'], " "))]
    };

    let size = style.font_size.unwrap_or_else(|| {
        let widest = lines.iter().map(Vec::len).max().unwrap_or(1).max(1) as f32;
        let by_height = (rect.height - PADDING) * 0.7;
        let by_width = inner_width / (widest * glyph_width);
        by_height.min(by_width).min(DEFAULT_FONT_SIZE)
    });
    let size = size.max(MIN_FONT_SIZE);
    let leading = size * 1.15;

    let mut ops = String::from("/Tx BMC\nq\nBT\n");
    ops.push_str(&format!("/{font} {} Tf\n0 g\n", num(size)));
    let first_baseline = if style.multiline {
        rect.height - PADDING - size
    } else {
        ((rect.height - size * 0.7) / 2.0).max(PADDING / 2.0)
    };
    let mut previous_x = 0.0;
    for (index, line) in lines.iter().enumerate() {
        let line_width = line.len() as f32 * size * glyph_width;
        let x = match style.quadding {
            1 => (rect.width - line_width) / 2.0,
            2 => rect.width - PADDING - line_width,
            _ => PADDING,
        }
        .max(PADDING / 2.0);
        if index == 0 {
            ops.push_str(&format!("{} {} Td\n", num(x), num(first_baseline)));
        } else {
            ops.push_str(&format!("{} {} Td\n", num(x - previous_x), num(-leading)));
        }
        previous_x = x;
        ops.push_str(&hex(line));
        ops.push_str(" Tj\n");
    }
    ops.push_str("ET\nQ\nEMC\n");

    let mut fonts_dict = Dictionary::new();
    fonts_dict.set(HELVETICA, helvetica);
    fonts_dict.set(ZAPF_DINGBATS, zapf);
    let mut resources = Dictionary::new();
    resources.set("Font", fonts_dict);

    let mut dict = Dictionary::new();
    dict.set("Type", "XObject");
    dict.set("Subtype", "Form");
    dict.set(
        "BBox",
        vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(rect.width),
            Object::Real(rect.height),
        ],
    );
    dict.set("Resources", resources);
    Stream::new(dict, ops.into_bytes())
}

/// Greedy word wrap by character count.
fn wrap(line: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    out.push(current);
    out
}
