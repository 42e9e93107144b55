use thiserror::Error;

use crate::form::FieldKind;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported form type: {0}")]
    UnsupportedFormType(String),

    #[error("template not found: {path}: {reason}")]
    TemplateNotFound { path: String, reason: String },

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field {name} is a {actual}, expected a {expected}")]
    FieldKindMismatch {
        name: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("field {name} has no option {option}")]
    InvalidOption { name: String, option: String },

    #[error("signature processing failed: {0}")]
    SignatureProcessing(String),

    #[error("PDF serialization failed: {0}")]
    Serialization(String),

    #[error("PDF structure error: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

impl From<jobsheet_core::error::CoreError> for RenderError {
    fn from(e: jobsheet_core::error::CoreError) -> Self {
        match e {
            jobsheet_core::error::CoreError::UnsupportedFormType(id) => {
                RenderError::UnsupportedFormType(id)
            }
            other => RenderError::Serialization(other.to_string()),
        }
    }
}
