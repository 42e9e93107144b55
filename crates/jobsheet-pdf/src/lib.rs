//! jobsheet-pdf
//!
//! Fills the fixed PDF templates from submission data. A template is a
//! declarative rule table interpreted by one engine against a fillable
//! document; the renderer orchestrates load, map, sign, flatten and
//! serialize for a single request.

pub mod audit;
pub mod dates;
pub mod document;
pub mod error;
pub mod form;
pub mod loader;
pub mod mapping;
pub mod minimal;
pub mod render;
pub mod signature;
pub mod templates;

mod acroform;
mod appearance;
mod content;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use document::{FillableDocument, FlatDocument};
pub use error::RenderError;
pub use form::{FieldKind, Form};
pub use render::Renderer;
