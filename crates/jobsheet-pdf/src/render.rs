//! Dispatch: form id → template → filled, signed, flattened bytes.

use std::path::PathBuf;
use std::sync::Arc;

use jiff::civil::Date;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::form_kind::FormKind;
use tracing::{info, warn};

use crate::document::FlatDocument;
use crate::error::RenderError;
use crate::loader::TemplateLoader;
use crate::mapping::apply_rules;
use crate::minimal;
use crate::signature::{HttpFetcher, SignatureFetcher, embed_signature};
use crate::templates::{RenderMode, Template, get_template};

/// Renders forms from the templates in one forms directory. Cheap to clone;
/// every render loads its own copy of the template.
#[derive(Clone)]
pub struct Renderer {
    loader: TemplateLoader,
    fetcher: Arc<dyn SignatureFetcher>,
}

impl Renderer {
    pub fn new(forms_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader: TemplateLoader::new(forms_dir),
            fetcher: Arc::new(HttpFetcher),
        }
    }

    /// Replace the transport used for signature URLs.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn SignatureFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    /// Render `data` with the template registered for `form_id`.
    ///
    /// Unknown ids fail with `UnsupportedFormType` before any file is read.
    /// Strict templates propagate load and flatten failures; the lenient
    /// template answers them with a synthesized summary page instead.
    pub fn render(
        &self,
        form_id: &str,
        data: &FormData,
        today: Date,
    ) -> Result<Vec<u8>, RenderError> {
        let kind: FormKind = form_id.parse()?;
        let template = get_template(kind);

        match template.mode() {
            RenderMode::Strict => self.fill(template.as_ref(), data, today)?.to_bytes(),
            RenderMode::Lenient => match self.fill(template.as_ref(), data, today) {
                Ok(document) => document.to_bytes(),
                Err(e) => {
                    warn!(form_id, error = %e, "template unusable, rendering summary page");
                    let (title, entries) = template.summary(data, today);
                    minimal::summary_document(&title, &entries)?.to_bytes()
                }
            },
        }
    }

    fn fill(
        &self,
        template: &dyn Template,
        data: &FormData,
        today: Date,
    ) -> Result<FlatDocument, RenderError> {
        let form_id = template.kind().id();
        let mut document = self.loader.load(template.file_name())?;
        if template.mode() == RenderMode::Lenient && !document.has_form() {
            return Err(RenderError::Pdf(format!(
                "{} has no form fields",
                template.file_name()
            )));
        }

        let report = apply_rules(&mut document, template.rules(), data, today);
        let signed = template
            .signature()
            .is_some_and(|spec| embed_signature(&mut document, &spec, data, self.fetcher.as_ref()));
        info!(
            form_id,
            written = report.written,
            skipped = report.skipped.len(),
            signed,
            "filled template"
        );

        document.flatten()
    }
}
