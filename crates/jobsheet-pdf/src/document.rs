//! Fillable and flattened documents over `lopdf`.

use std::collections::{BTreeMap, HashMap, HashSet};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use tracing::debug;

use crate::acroform::{self, Field};
use crate::appearance::{self, Appearance, Rect, TextStyle};
use crate::content::{
    append_isolated, catalog_id, decode_text, dict_mut, encode_text, num, register_xobject,
    standard_font,
};
use crate::error::RenderError;
use crate::form::{FieldKind, Form, expect_kind};

const HIDDEN: i64 = 1 << 1;

/// Decoded raster image ready to be embedded: 8-bit RGB samples plus an
/// 8-bit alpha plane used as a soft mask.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Vec<u8>,
}

/// A loaded PDF with an interactive form. Owned by one render.
pub struct FillableDocument {
    doc: Document,
    fields: BTreeMap<String, Field>,
    overlays: BTreeMap<ObjectId, Vec<u8>>,
    next_xobject: usize,
}

impl FillableDocument {
    pub fn load(bytes: &[u8]) -> Result<Self, RenderError> {
        let doc = Document::load_mem(bytes)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_document(doc: Document) -> Self {
        let fields = acroform::collect_fields(&doc);
        Self {
            doc,
            fields,
            overlays: BTreeMap::new(),
            next_xobject: 0,
        }
    }

    /// Fully-qualified names of every terminal field.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn has_form(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Current value of a text field.
    pub fn text_value(&self, name: &str) -> Option<String> {
        let field = self.fields.get(name)?;
        let dict = self.doc.get_dictionary(field.id).ok()?;
        dict.get(b"V").ok().and_then(decode_text)
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.selected(name).is_some()
    }

    /// Value name of a button field, `None` when off.
    pub fn selected(&self, name: &str) -> Option<String> {
        let field = self.fields.get(name)?;
        let dict = self.doc.get_dictionary(field.id).ok()?;
        match dict.get(b"V") {
            Ok(Object::Name(value)) if value != b"Off" => {
                Some(String::from_utf8_lossy(value).into_owned())
            }
            _ => None,
        }
    }

    /// Draw an image on a page (1-based), bottom-left corner at `(x, y)`.
    /// The drawing is committed to the page content when flattening.
    pub fn draw_image(
        &mut self,
        page_number: u32,
        image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), RenderError> {
        let page_id = *self
            .doc
            .get_pages()
            .get(&page_number)
            .ok_or_else(|| RenderError::Pdf(format!("page {page_number} out of range")))?;

        let smask_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            image.alpha.clone(),
        ));
        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            image.rgb.clone(),
        ));

        let name = self.xobject_name("Img");
        register_xobject(&mut self.doc, page_id, &name, image_id)?;
        self.push_overlay(
            page_id,
            format!(
                "q {} 0 0 {} {} {} cm /{name} Do Q\n",
                num(width),
                num(height),
                num(x),
                num(y)
            ),
        );
        Ok(())
    }

    /// Render every widget into static page content and drop the
    /// interactive form.
    pub fn flatten(mut self) -> Result<FlatDocument, RenderError> {
        let widget_pages = self.widget_pages();
        let defaults = acroform::acroform(&self.doc).cloned();
        let fonts = (
            standard_font(&mut self.doc, "Helvetica"),
            standard_font(&mut self.doc, "ZapfDingbats"),
        );

        let fields = std::mem::take(&mut self.fields);
        let mut removed = HashSet::new();
        for field in fields.values() {
            for widget in &field.widgets {
                removed.insert(*widget);
                let Some(page_id) = widget_pages.get(widget).copied() else {
                    continue;
                };
                let Ok(widget_dict) = self.doc.get_dictionary(*widget) else {
                    continue;
                };
                if matches!(widget_dict.get(b"F"), Ok(Object::Integer(f)) if f & HIDDEN != 0) {
                    continue;
                }
                let Some(rect) = widget_dict
                    .get(b"Rect")
                    .ok()
                    .and_then(|r| Rect::from_object(&self.doc, r))
                else {
                    continue;
                };

                let appearance = match field.kind {
                    FieldKind::Text => {
                        let value = self
                            .doc
                            .get_dictionary(field.id)
                            .ok()
                            .and_then(|d| d.get(b"V").ok())
                            .and_then(decode_text)
                            .unwrap_or_default();
                        if value.is_empty() {
                            None
                        } else {
                            let style = TextStyle::lookup(
                                &self.doc,
                                *widget,
                                field.id,
                                field.flags,
                                defaults.as_ref(),
                            );
                            Some(Appearance::Inline(appearance::text_appearance(
                                &value, rect, &style, fonts,
                            )))
                        }
                    }
                    _ => appearance::current_appearance(&self.doc, *widget),
                };
                let Some(appearance) = appearance else {
                    continue;
                };
                let stream_id = match appearance {
                    Appearance::Existing(id) => id,
                    Appearance::Inline(stream) => self.doc.add_object(stream),
                };
                if let Ok(Object::Stream(stream)) = self.doc.get_object_mut(stream_id) {
                    stream.dict.set("Type", "XObject");
                    stream.dict.set("Subtype", "Form");
                }
                self.place_form(page_id, stream_id, rect)?;
            }
        }

        for page_id in self.doc.get_pages().into_values() {
            strip_widgets(&mut self.doc, page_id, &removed)?;
        }
        let overlays = std::mem::take(&mut self.overlays);
        for (page_id, ops) in overlays {
            append_isolated(&mut self.doc, page_id, ops)?;
        }
        let catalog = catalog_id(&self.doc)?;
        dict_mut(&mut self.doc, catalog)?.remove(b"AcroForm");

        let pruned = self.doc.prune_objects();
        debug!(
            widgets = removed.len(),
            pruned = pruned.len(),
            "flattened form"
        );
        Ok(FlatDocument { doc: self.doc })
    }

    fn place_form(
        &mut self,
        page_id: ObjectId,
        stream_id: ObjectId,
        rect: Rect,
    ) -> Result<(), RenderError> {
        let (bx1, by1, bx2, by2) = appearance::bbox(&self.doc, stream_id);
        let sx = rect.width / (bx2 - bx1);
        let sy = rect.height / (by2 - by1);
        let tx = rect.x - bx1 * sx;
        let ty = rect.y - by1 * sy;

        let name = self.xobject_name("Fld");
        register_xobject(&mut self.doc, page_id, &name, stream_id)?;
        self.push_overlay(
            page_id,
            format!(
                "q {} 0 0 {} {} {} cm /{name} Do Q\n",
                num(sx),
                num(sy),
                num(tx),
                num(ty)
            ),
        );
        Ok(())
    }

    fn xobject_name(&mut self, prefix: &str) -> String {
        self.next_xobject += 1;
        format!("Js{prefix}{}", self.next_xobject)
    }

    fn push_overlay(&mut self, page_id: ObjectId, ops: String) {
        self.overlays
            .entry(page_id)
            .or_default()
            .extend(ops.into_bytes());
    }

    /// Widget annotation → page, from each page's `/Annots`, falling back to
    /// the widget's `/P` entry.
    fn widget_pages(&self) -> HashMap<ObjectId, ObjectId> {
        let mut pages = HashMap::new();
        for page_id in self.doc.get_pages().into_values() {
            let annots = self
                .doc
                .get_dictionary(page_id)
                .ok()
                .and_then(|page| page.get(b"Annots").ok())
                .and_then(|annots| crate::content::resolve(&self.doc, annots));
            if let Some(Object::Array(items)) = annots {
                for item in items {
                    if let Object::Reference(id) = item {
                        pages.insert(*id, page_id);
                    }
                }
            }
        }
        for field in self.fields.values() {
            for widget in &field.widgets {
                if pages.contains_key(widget) {
                    continue;
                }
                let page = self
                    .doc
                    .get_dictionary(*widget)
                    .ok()
                    .and_then(|w| w.get(b"P").ok())
                    .and_then(|p| p.as_reference().ok());
                if let Some(page) = page {
                    pages.insert(*widget, page);
                }
            }
        }
        pages
    }

    fn field(&self, name: &str, expected: FieldKind) -> Result<Field, RenderError> {
        expect_kind(name, self.field_kind(name), expected)?;
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::FieldNotFound(name.to_string()))
    }

    fn set_state(&mut self, id: ObjectId, key: &str, state: &[u8]) -> Result<(), RenderError> {
        dict_mut(&mut self.doc, id)?.set(key, Object::Name(state.to_vec()));
        Ok(())
    }
}

impl Form for FillableDocument {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).map(|f| f.kind)
    }

    fn set_text(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        let field = self.field(name, FieldKind::Text)?;
        dict_mut(&mut self.doc, field.id)?.set("V", encode_text(value));
        Ok(())
    }

    fn check(&mut self, name: &str) -> Result<(), RenderError> {
        let field = self.field(name, FieldKind::CheckBox)?;
        let on = field
            .widgets
            .iter()
            .find_map(|w| acroform::on_states(&self.doc, *w).into_iter().next())
            .unwrap_or_else(|| b"Yes".to_vec());
        self.set_state(field.id, "V", &on)?;
        for widget in &field.widgets {
            self.set_state(*widget, "AS", &on)?;
        }
        Ok(())
    }

    fn select(&mut self, group: &str, option: &str) -> Result<(), RenderError> {
        let field = self.field(group, FieldKind::RadioGroup)?;
        let exports = acroform::export_values(&self.doc, field.id);
        let states: Vec<Vec<Vec<u8>>> = field
            .widgets
            .iter()
            .map(|w| acroform::on_states(&self.doc, *w))
            .collect();

        let chosen = states
            .iter()
            .enumerate()
            .find(|(index, on)| {
                on.iter().any(|s| s == option.as_bytes())
                    || exports.get(*index).is_some_and(|e| e == option)
            })
            .and_then(|(_, on)| on.first().cloned())
            .ok_or_else(|| RenderError::InvalidOption {
                name: group.to_string(),
                option: option.to_string(),
            })?;

        self.set_state(field.id, "V", &chosen)?;
        for (widget, on) in field.widgets.iter().zip(&states) {
            let state: &[u8] = if on.contains(&chosen) { &chosen } else { b"Off" };
            self.set_state(*widget, "AS", state)?;
        }
        Ok(())
    }
}

/// Remove the given widget annotations from a page's `/Annots`.
fn strip_widgets(
    doc: &mut Document,
    page_id: ObjectId,
    removed: &HashSet<ObjectId>,
) -> Result<(), RenderError> {
    let shared = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Array(_)) => None,
        _ => return Ok(()),
    };
    let keep = |obj: &Object| !matches!(obj, Object::Reference(id) if removed.contains(id));
    let now_empty = match shared {
        Some(id) => match doc.get_object_mut(id) {
            Ok(Object::Array(items)) => {
                items.retain(|obj| keep(obj));
                items.is_empty()
            }
            _ => false,
        },
        None => match dict_mut(doc, page_id)?.get_mut(b"Annots") {
            Ok(Object::Array(items)) => {
                items.retain(|obj| keep(obj));
                items.is_empty()
            }
            _ => false,
        },
    };
    if now_empty {
        dict_mut(doc, page_id)?.remove(b"Annots");
    }
    Ok(())
}

/// A flattened, non-interactive document ready to serialize.
pub struct FlatDocument {
    doc: Document,
}

impl FlatDocument {
    pub fn from_document(doc: Document) -> Self {
        Self { doc }
    }

    pub fn to_bytes(mut self) -> Result<Vec<u8>, RenderError> {
        self.doc.compress();
        let mut out = Vec::new();
        self.doc
            .save_to(&mut out)
            .map_err(|e| RenderError::Serialization(e.to_string()))?;
        Ok(out)
    }
}
