use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::signature::{Scaling, SignatureSpec};
use crate::templates::{MARK_X, Template};

/// SAHL completion report.
pub struct Sahl;

/// Yes/no questions answered with `yes`/`y` or `no`/`n`.
const fn question(key: &'static str, yes: &'static str, no: &'static str) -> FieldRule {
    FieldRule::YesNo {
        key,
        yes: Some(yes),
        no: Some(no),
        mark: MARK_X,
        letters: true,
    }
}

static RULES: &[FieldRule] = &[
    FieldRule::Text {
        key: "field-clientname",
        field: "ClientName_ZIUG",
    },
    FieldRule::Text {
        key: "field-clientref",
        field: "ClientRef",
    },
    FieldRule::Text {
        key: "field-clientaddress",
        field: "ClientAddress",
    },
    FieldRule::Text {
        key: "field-clientdamage",
        field: "ClientDamage",
    },
    FieldRule::Text {
        key: "field-staffname",
        field: "StaffName",
    },
    FieldRule::Text {
        key: "field-scopework-general",
        field: "textarea_26kyol",
    },
    FieldRule::Today {
        field: "Date",
        style: DateStyle::Long,
    },
    question("field-checkbox1", "CheckBox1-1", "CheckBox1-2"),
    question("field-checkbox2", "CheckBox2-1", "CheckBox2-2"),
    question("field-checkbox3", "CheckBox3-1", "CheckBox3-2"),
    question("field-checkbox4", "CheckBox4-1", "CheckBox4-2"),
    question("field-checkbox5", "CheckBox5-1", "CheckBox5-2"),
    question("field-checkbox7", "CheckBox7-1", "CheckBox7-2"),
    FieldRule::Rating {
        key: "field-checkbox6",
        pattern: "CheckBox6-{n}",
        mark: MARK_X,
    },
];

impl Template for Sahl {
    fn kind(&self) -> FormKind {
        FormKind::Sahl
    }

    fn file_name(&self) -> &'static str {
        "sahlld.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn signature(&self) -> Option<SignatureSpec> {
        Some(SignatureSpec {
            keys: &["signature", "field-signature", "field-signature-sahl"],
            x: 400.0,
            y: 100.0,
            scaling: Scaling::BOUNDED,
        })
    }
}
