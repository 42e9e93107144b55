use jiff::civil::Date;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::signature::{Scaling, SignatureSpec};
use crate::templates::{RenderMode, Template};

/// ABSA insurance completion certificate.
///
/// The only lenient template: when the file is unusable the client still
/// gets a one-page summary of what was submitted.
pub struct Absa;

const DATE_STYLE: DateStyle = DateStyle::DayMonth;

static RULES: &[FieldRule] = &[
    FieldRule::Text {
        key: "field-csa-ref",
        field: "CSA Ref",
    },
    FieldRule::Text {
        key: "field-full-name",
        field: "Full name of Insured",
    },
    FieldRule::Text {
        key: "field-claim-number",
        field: "Claim no",
    },
    FieldRule::Text {
        key: "field-property-address",
        field: "Property address",
    },
    FieldRule::Text {
        key: "field-cause-damage",
        field: "Cause of damage",
    },
    FieldRule::Text {
        key: "field-staff-name-absa",
        field: "IWe confirm that the work undertaken by",
    },
    FieldRule::RadioYesElse {
        key: "field-excess-paid-absa",
        group: "Group1",
        yes: "Choice1",
        otherwise: "Choice2",
    },
    FieldRule::Today {
        field: "Text2",
        style: DATE_STYLE,
    },
    FieldRule::Grid {
        key: "field-checkbox{n}",
        rows: 13,
        field: "Check Box3.{row}.{col}",
    },
];

const SUMMARY: [(&str, &str); 7] = [
    ("CSA Ref", "field-csa-ref"),
    ("Full Name of Insured", "field-full-name"),
    ("Claim Number", "field-claim-number"),
    ("Property Address", "field-property-address"),
    ("Cause of Damage", "field-cause-damage"),
    ("Staff Name", "field-staff-name-absa"),
    ("Excess Paid", "field-excess-paid-absa"),
];

impl Template for Absa {
    fn kind(&self) -> FormKind {
        FormKind::Absa
    }

    fn file_name(&self) -> &'static str {
        "ABSACertificate.pdf"
    }

    fn mode(&self) -> RenderMode {
        RenderMode::Lenient
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn signature(&self) -> Option<SignatureSpec> {
        Some(SignatureSpec {
            keys: &["signature", "field-signature", "field-signature-absa"],
            x: 400.0,
            y: 100.0,
            scaling: Scaling::BOUNDED,
        })
    }

    fn summary(&self, data: &FormData, today: Date) -> (String, Vec<(String, String)>) {
        let mut lines: Vec<(String, String)> = SUMMARY
            .iter()
            .filter_map(|(label, key)| Some((label.to_string(), data.text(key)?)))
            .collect();
        lines.push(("Date".to_string(), DATE_STYLE.format(today)));
        ("ABSA Certificate".to_string(), lines)
    }
}
