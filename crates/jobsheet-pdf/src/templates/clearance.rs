use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::signature::{Scaling, SignatureSpec};
use crate::templates::{MARK_X, Template};

/// BBP clearance certificate.
pub struct Clearance;

const fn quality(key: &'static str, yes: &'static str, no: &'static str) -> FieldRule {
    FieldRule::YesNo {
        key,
        yes: Some(yes),
        no: Some(no),
        mark: MARK_X,
        letters: false,
    }
}

static RULES: &[FieldRule] = &[
    FieldRule::Text {
        key: "field-cname",
        field: "CName",
    },
    FieldRule::Text {
        key: "field-cref",
        field: "CRef",
    },
    FieldRule::Text {
        key: "field-caddress",
        field: "CAddress",
    },
    FieldRule::Text {
        key: "field-cdamage",
        field: "CDamage",
    },
    FieldRule::Text {
        key: "field-gcomments",
        field: "GComments",
    },
    FieldRule::Text {
        key: "field-scopework",
        field: "ScopeWork",
    },
    FieldRule::OtherDetail {
        key: "field-oldgeyser",
        detail: "field-oldgeyser-details",
        field: "OLDGEYSER",
    },
    FieldRule::OtherDetail {
        key: "field-newgeyser",
        detail: "field-newgeyser-details",
        field: "NEWGEYSER",
    },
    FieldRule::Text {
        key: "field-staff",
        field: "Staff",
    },
    FieldRule::Today {
        field: "Date_UAAD",
        style: DateStyle::Long,
    },
    quality("field-cquality1", "CQuality1yes", "CQuality1"),
    quality("field-cquality2", "CQuality2yes", "CQuality2No"),
    quality("field-cquality3", "CQuality3Yes", "CQuality3No"),
    quality("field-cquality4", "CQuality4Yes", "CQuality4No"),
    quality("field-cquality5", "CQuality5Yes", "CQuality5No"),
    FieldRule::Rating {
        key: "field-cquality6",
        pattern: "CQuality6={n}",
        mark: MARK_X,
    },
    quality("field-excess", "Excess=Yes", "Excess=No"),
    FieldRule::TextIfPresent {
        key: "field-amount",
        field: "Excess",
    },
];

impl Template for Clearance {
    fn kind(&self) -> FormKind {
        FormKind::Clearance
    }

    fn file_name(&self) -> &'static str {
        "BBPClearanceCertificate.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn signature(&self) -> Option<SignatureSpec> {
        Some(SignatureSpec {
            keys: &["signature", "field-signature", "field-signature-clearance"],
            x: 400.0,
            y: 150.0,
            scaling: Scaling::BOUNDED,
        })
    }
}
