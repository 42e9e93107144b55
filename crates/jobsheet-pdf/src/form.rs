//! The form view of a fillable document.
//!
//! The rule engine only ever talks to this trait. [`crate::FillableDocument`]
//! implements it over a real PDF; tests can implement it over a map.

use std::fmt;

use serde::Serialize;

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    CheckBox,
    RadioGroup,
    PushButton,
    Choice,
    Signature,
}

impl FieldKind {
    /// Field kind from the inherited `/FT` and `/Ff` values of a terminal
    /// field. `None` for unknown field types.
    pub fn from_pdf(field_type: &[u8], flags: i64) -> Option<Self> {
        const RADIO: i64 = 1 << 15;
        const PUSH_BUTTON: i64 = 1 << 16;

        match field_type {
            b"Tx" => Some(FieldKind::Text),
            b"Btn" if flags & PUSH_BUTTON != 0 => Some(FieldKind::PushButton),
            b"Btn" if flags & RADIO != 0 => Some(FieldKind::RadioGroup),
            b"Btn" => Some(FieldKind::CheckBox),
            b"Ch" => Some(FieldKind::Choice),
            b"Sig" => Some(FieldKind::Signature),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Text => "text field",
            FieldKind::CheckBox => "checkbox",
            FieldKind::RadioGroup => "radio group",
            FieldKind::PushButton => "push button",
            FieldKind::Choice => "choice field",
            FieldKind::Signature => "signature field",
        })
    }
}

/// Named interactive fields that can be queried and written.
pub trait Form {
    /// Kind of the field with this fully-qualified name, if it exists.
    fn field_kind(&self, name: &str) -> Option<FieldKind>;

    fn has_field(&self, name: &str) -> bool {
        self.field_kind(name).is_some()
    }

    /// Set the value of a text field.
    fn set_text(&mut self, name: &str, value: &str) -> Result<(), RenderError>;

    /// Turn a checkbox on.
    fn check(&mut self, name: &str) -> Result<(), RenderError>;

    /// Select one option of a radio group.
    fn select(&mut self, group: &str, option: &str) -> Result<(), RenderError>;
}

/// Resolve a field and verify its kind. Shared by [`Form`] implementations.
pub(crate) fn expect_kind(
    name: &str,
    actual: Option<FieldKind>,
    expected: FieldKind,
) -> Result<(), RenderError> {
    match actual {
        None => Err(RenderError::FieldNotFound(name.to_string())),
        Some(actual) if actual != expected => Err(RenderError::FieldKindMismatch {
            name: name.to_string(),
            expected,
            actual,
        }),
        Some(_) => Ok(()),
    }
}
