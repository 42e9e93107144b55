use jobsheet_core::models::form_kind::FormKind;

use crate::dates::DateStyle;
use crate::mapping::FieldRule;
use crate::signature::{Scaling, SignatureSpec};
use crate::templates::{MARK_X, Template};

/// Discovery geyser claim sheet.
pub struct Discovery;

const SIZES: &[&str] = &["50", "100", "150", "200", "250", "300", "350"];

const fn text(key: &'static str, field: &'static str) -> FieldRule {
    FieldRule::Text { key, field }
}

const fn installed(key: &'static str, prefix: &'static str) -> FieldRule {
    FieldRule::TriState {
        key,
        prefix,
        mark: MARK_X,
    }
}

static RULES: &[FieldRule] = &[
    text("field-claim-number", "ClaimNo"),
    text("field-client-name", "ClientName"),
    FieldRule::TextOrToday {
        key: "field-date",
        field: "Date",
        style: DateStyle::Long,
    },
    text("field-address", "Address"),
    text("field-company-name", "company"),
    text("field-plumber-name", "staff"),
    text("field-license-number", "license number"),
    FieldRule::YesElseNo {
        key: "field-geyser-replaced",
        yes: "geyserreplaced_Y",
        no: "geyserreplaced_N",
        mark: MARK_X,
    },
    FieldRule::YesElseNo {
        key: "field-geyser-repair",
        yes: "geyserrepaired_Y",
        no: "geyserrepaired_N",
        mark: MARK_X,
    },
    // Old geyser
    FieldRule::Exclusive {
        key: "field-old-geyser-type",
        lowercase: true,
        options: &[
            ("electric", "ELECTRICgeyser"),
            ("solar", "SOLARgeyser"),
            ("other", "OTHERgeyser"),
        ],
        mark: MARK_X,
    },
    text("field-old-geyser-other", "OTHERgeyserspecs"),
    FieldRule::Sizes {
        key: "field-old-geyser-size",
        pattern: "geyserSize{n}",
        sizes: SIZES,
        mark: MARK_X,
    },
    FieldRule::Exclusive {
        key: "field-old-geyser-make",
        lowercase: false,
        options: &[
            ("Heat Tech", "HeatTechgeyser"),
            ("Kwikot", "KwiKotgeyser"),
            ("Other", "OtherTypegeyser"),
        ],
        mark: MARK_X,
    },
    text("field-old-serial-number", "serialgeyser"),
    text("field-old-code", "geysercode"),
    text("field-old-no-tag", "notag"),
    FieldRule::Exclusive {
        key: "field-wall-mounted",
        lowercase: false,
        options: &[("Y", "wallmountedgeyser")],
        mark: MARK_X,
    },
    FieldRule::Exclusive {
        key: "field-inside-roof",
        lowercase: false,
        options: &[("Y", "inroofgeyser")],
        mark: MARK_X,
    },
    text("field-other-location", "OtherAreageyser"),
    // New geyser
    FieldRule::Exclusive {
        key: "field-new-geyser-type",
        lowercase: true,
        options: &[
            ("electric", "newgeyserELECTRIC"),
            ("solar", "newgeyserSOLAR"),
            ("other", "newgeyserOTHER"),
        ],
        mark: MARK_X,
    },
    text("field-new-geyser-other", "newgeyserOTHERTEXT"),
    FieldRule::Sizes {
        key: "field-new-geyser-size",
        pattern: "NEWgeyserSize{n}",
        sizes: SIZES,
        mark: MARK_X,
    },
    FieldRule::Exclusive {
        key: "field-new-geyser-make",
        lowercase: false,
        options: &[("Heat Tech", "newgeyserHEATECH"), ("Kwikot", "newgeyserKWIKOT")],
        mark: MARK_X,
    },
    text("field-new-serial-number", "NEWserialgeyser"),
    text("field-new-code", "NEWgeysercode"),
    // Installed items
    installed("field-item-geyser", "INSTALLEDgeyser"),
    installed("field-item-drip-tray", "INSTALLEDDrip"),
    installed("field-item-vacuum-breakers", "INSTALLEDVB"),
    installed("field-item-platform", "INSTALLEDPlatform"),
    installed("field-item-bonding", "INSTALLEDBonding"),
    installed("field-item-isolator", "INSTALLEDIsolator"),
    installed("field-item-pressure-valve", "INSTALLEDPCV"),
    installed("field-item-relocated", "INSTALLEDRelocated"),
    installed("field-item-thermostat", "INSTALLEDThermostat"),
    installed("field-item-element", "INSTALLEDElement"),
    installed("field-item-safety-valve", "INSTALLEDSafetyValve"),
    installed("field-item-non-return", "INSTALLEDNonreturn"),
    // Solar items
    installed("field-solar-vacuum-tubes", "SOLARVacuumTubes"),
    installed("field-solar-flat-panels", "SOLARFlatPanels"),
    installed("field-solar-circulation-pump", "SOLARCirculationPump"),
    installed("field-solar-geyser-wise", "SOLARGeyserWise"),
    installed("field-solar-mixing-valve", "SOLARMixingValve"),
    installed("field-solar-panel-12v", "SOLAR12VPanel"),
];

impl Template for Discovery {
    fn kind(&self) -> FormKind {
        FormKind::Discovery
    }

    fn file_name(&self) -> &'static str {
        "DiscoveryCS.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn signature(&self) -> Option<SignatureSpec> {
        Some(SignatureSpec {
            keys: &["signature", "field-signature", "field-signature-discovery"],
            x: 400.0,
            y: 200.0,
            scaling: Scaling::Flat(0.3),
        })
    }
}
