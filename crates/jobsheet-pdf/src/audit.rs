//! Template audit: which expected fields each template file actually has.

use serde::Serialize;

use crate::form::Form;
use crate::render::Renderer;
use crate::templates::{RenderMode, all_templates};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAudit {
    pub form_id: &'static str,
    pub file_name: &'static str,
    pub lenient: bool,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub field_count: usize,
    /// Expected fields absent from the file.
    pub missing_fields: Vec<String>,
    /// Expected fields present with a different kind.
    pub mismatched_fields: Vec<String>,
}

impl Renderer {
    /// Check every registered template against its file.
    pub fn audit(&self) -> Vec<TemplateAudit> {
        all_templates()
            .iter()
            .map(|template| {
                let mut audit = TemplateAudit {
                    form_id: template.kind().id(),
                    file_name: template.file_name(),
                    lenient: template.mode() == RenderMode::Lenient,
                    present: false,
                    error: None,
                    field_count: 0,
                    missing_fields: Vec::new(),
                    mismatched_fields: Vec::new(),
                };
                let document = match self.loader().load(template.file_name()) {
                    Ok(document) => document,
                    Err(e) => {
                        audit.error = Some(e.to_string());
                        return audit;
                    }
                };
                audit.present = true;
                audit.field_count = document.field_names().len();
                for target in template.expected_fields() {
                    match document.field_kind(&target.name) {
                        None => audit.missing_fields.push(target.name),
                        Some(kind) if kind != target.kind => {
                            audit.mismatched_fields.push(target.name)
                        }
                        Some(_) => {}
                    }
                }
                audit
            })
            .collect()
    }
}
