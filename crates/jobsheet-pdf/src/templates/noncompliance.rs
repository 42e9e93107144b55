use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::templates::Template;

/// Non-compliance notice. Filled from query-string data, so values are
/// plain strings and `selectedIssues` arrives JSON-encoded.
pub struct NonCompliance;

/// Number of issue checkboxes printed on the notice.
pub const ISSUE_COUNT: usize = 33;

/// Field name patterns tried in order for a selected issue.
pub const ISSUE_CANDIDATES: &[&str] = &[
    "n{n}",
    "checkbox{n}",
    "issue{n}",
    "item{n}",
    "Check Box{n}",
    "CheckBox{n}",
];

const fn text(key: &'static str, field: &'static str) -> FieldRule {
    FieldRule::Text { key, field }
}

static RULES: &[FieldRule] = &[
    text("claimNumber", "C_Number"),
    text("clientName", "C_FName"),
    text("insuranceName", "I_Name"),
    FieldRule::TextOrToday {
        key: "date",
        field: "Date",
        style: DateStyle::Iso,
    },
    text("geyserMake", "Geyser_make"),
    text("serial", "Geyser_Serial"),
    text("code", "Geyser_Code"),
    FieldRule::CheckOption {
        key: "plumberIndemnity",
        options: &[
            ("Electric geyser", "EG_PI"),
            ("Solar geyser", "SG_PI"),
            ("Heat pump", "HP_PI"),
            ("Pipe Repairs", "PR_PI"),
            ("Assessment", "A_PI"),
        ],
    },
    FieldRule::CheckOption {
        key: "quotationAvailable",
        options: &[("YES", "Quote_Y"), ("NO", "Quote_N")],
    },
    FieldRule::ProbeCheckBoxes {
        key: "selectedIssues",
        candidates: ISSUE_CANDIDATES,
    },
];

impl Template for NonCompliance {
    fn kind(&self) -> FormKind {
        FormKind::NonCompliance
    }

    fn file_name(&self) -> &'static str {
        "Noncompliance.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }
}
