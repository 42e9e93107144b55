//! Template descriptors, one module per form type.

pub mod absa;
pub mod clearance;
pub mod discovery;
pub mod liability;
pub mod material_list;
pub mod noncompliance;
pub mod sahl;

use jiff::civil::Date;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::form_kind::FormKind;

use crate::mapping::{FieldRule, FieldTarget};
use crate::signature::SignatureSpec;

/// Mark written into text fields that stand in for checkboxes.
pub const MARK_X: &str = "X";
pub const MARK_TICK: &str = "✔";

/// What happens when the template cannot be loaded or filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fail the render.
    Strict,
    /// Return a synthesized summary document instead.
    Lenient,
}

/// Trait implemented by each fillable form template.
pub trait Template: Send + Sync {
    fn kind(&self) -> FormKind;

    /// File name inside the forms directory.
    fn file_name(&self) -> &'static str;

    fn mode(&self) -> RenderMode {
        RenderMode::Strict
    }

    fn rules(&self) -> &'static [FieldRule];

    fn signature(&self) -> Option<SignatureSpec> {
        None
    }

    /// Title and `(label, value)` lines of the synthesized summary used by
    /// lenient templates.
    fn summary(&self, _data: &FormData, _today: Date) -> (String, Vec<(String, String)>) {
        (self.kind().to_string(), Vec::new())
    }

    /// Every field the rules may write, deduplicated in rule order.
    fn expected_fields(&self) -> Vec<FieldTarget> {
        let mut targets: Vec<FieldTarget> = Vec::new();
        for target in self.rules().iter().flat_map(FieldRule::targets) {
            if !targets.iter().any(|t| t.name == target.name) {
                targets.push(target);
            }
        }
        targets
    }
}

/// Return all registered templates.
pub fn all_templates() -> Vec<Box<dyn Template>> {
    vec![
        Box::new(absa::Absa),
        Box::new(clearance::Clearance),
        Box::new(sahl::Sahl),
        Box::new(discovery::Discovery),
        Box::new(liability::Liability),
        Box::new(noncompliance::NonCompliance),
        Box::new(material_list::MaterialList),
    ]
}

/// Look up the template for a form type.
pub fn get_template(kind: FormKind) -> Box<dyn Template> {
    match kind {
        FormKind::Absa => Box::new(absa::Absa),
        FormKind::Clearance => Box::new(clearance::Clearance),
        FormKind::Sahl => Box::new(sahl::Sahl),
        FormKind::Discovery => Box::new(discovery::Discovery),
        FormKind::Liability => Box::new(liability::Liability),
        FormKind::NonCompliance => Box::new(noncompliance::NonCompliance),
        FormKind::MaterialList => Box::new(material_list::MaterialList),
    }
}
