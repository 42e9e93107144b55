use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::FillableDocument;
use crate::error::RenderError;

/// Reads template files from the forms directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    forms_dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(forms_dir: impl Into<PathBuf>) -> Self {
        Self {
            forms_dir: forms_dir.into(),
        }
    }

    pub fn forms_dir(&self) -> &Path {
        &self.forms_dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.forms_dir.join(file_name)
    }

    /// Load and parse a template. Missing, unreadable and unparseable files
    /// are all `TemplateNotFound`.
    pub fn load(&self, file_name: &str) -> Result<FillableDocument, RenderError> {
        let path = self.path_of(file_name);
        let not_found = |reason: String| RenderError::TemplateNotFound {
            path: path.display().to_string(),
            reason,
        };
        let bytes = std::fs::read(&path).map_err(|e| not_found(e.to_string()))?;
        let document = FillableDocument::load(&bytes).map_err(|e| not_found(e.to_string()))?;
        debug!(
            path = %path.display(),
            fields = document.field_names().len(),
            "loaded template"
        );
        Ok(document)
    }
}
