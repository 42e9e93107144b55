use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::signature::{Scaling, SignatureSpec};
use crate::templates::{MARK_TICK, Template};

/// Liability waiver.
pub struct Liability;

const fn text(key: &'static str, field: &'static str) -> FieldRule {
    FieldRule::Text { key, field }
}

const fn answer(
    key: &'static str,
    yes: Option<&'static str>,
    no: Option<&'static str>,
) -> FieldRule {
    FieldRule::YesNo {
        key,
        yes,
        no,
        mark: MARK_TICK,
        letters: false,
    }
}

static RULES: &[FieldRule] = &[
    FieldRule::Today {
        field: "L_Date",
        style: DateStyle::DayMonth,
    },
    text("field-liability-insurance", "L_Insurance"),
    text("field-liability-claim-number", "L_ClaimNumber"),
    text("field-client-name", "C_Name"),
    text("field-plumber-name", "P_Name"),
    text("field-l1", "L1"),
    text("field-l2", "L2"),
    text("field-l3", "L3"),
    text("field-l4", "L4"),
    text("field-l5", "L5"),
    text("field-l6", "L6"),
    text("field-l7", "L7"),
    text("field-l8", "L8"),
    text("field-old-geyser-liability", "P_KPABEFORE"),
    text("field-new-geyser-liability", "P_KPAAFTER"),
    text("field-temp-before-liability", "T_BEFORE"),
    text("field-temp-after-liability", "T_AFTER"),
    text("field-general-comments-liability", "textarea_33bxdi"),
    answer("field-l9wh", Some("WH_Yes"), Some("WH_No")),
    answer("field-additional-work", Some("WHA_Yes"), Some("WHA_No")),
    answer("field-excess-paid-liability", Some("EI_Yes"), Some("EI_No")),
    // The template has no "yes" box for this question.
    answer("field-geyser-installed", None, Some("Geyser_No")),
    answer(
        "field-balanced-system",
        Some("Balanced_System_Yes"),
        Some("Balanced_System_YesBalanced_System_No"),
    ),
    answer("field-nr-valve", Some("NRValve_Yes"), Some("NRValve_No")),
];

impl Template for Liability {
    fn kind(&self) -> FormKind {
        FormKind::Liability
    }

    fn file_name(&self) -> &'static str {
        "liabWave.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn signature(&self) -> Option<SignatureSpec> {
        Some(SignatureSpec {
            keys: &["signature", "field-signature", "field-signature-liability"],
            x: 400.0,
            y: 100.0,
            scaling: Scaling::Flat(0.3),
        })
    }
}
