use jobsheet_core::models::form_kind::FormKind;

use crate::mapping::FieldRule;
use crate::templates::{MARK_TICK, Template};

/// Material list. Filled from a JSON body with nested item objects and row
/// arrays.
pub struct MaterialList;

pub const MAX_SUNDRIES: usize = 15;
pub const MAX_ADDITIONAL_MATERIALS: usize = 5;

const fn text(key: &'static str, field: &'static str) -> FieldRule {
    FieldRule::Text { key, field }
}

const fn brand(key: &'static str, field: &'static str) -> FieldRule {
    FieldRule::Flag {
        key,
        field,
        mark: MARK_TICK,
    }
}

static RULES: &[FieldRule] = &[
    text("date", "ML_Date"),
    text("plumber", "ML_Plumber"),
    text("claimNumber", "ML_ClaimNumber"),
    text("insurance", "ML_Insurance"),
    text("geyser.size", "Geyser_Size"),
    brand("geyser.kwikot", "Geyser_Kwikot"),
    brand("geyser.heatTech", "Geyser_HeatTech"),
    brand("geyser.techron", "Geyser_Techron"),
    text("dripTray.size", "Drip_Tray"),
    brand("dripTray.kwikot", "Drip_Tray_Kwikot"),
    brand("dripTray.heatTech", "Drip_Tray_HeatTech"),
    brand("dripTray.techron", "Drip_Tray_Techron"),
    FieldRule::Joined {
        keys: &["vacuumBreaker1.size", "vacuumBreaker2.size"],
        field: "Vacumm_B",
    },
    brand("vacuumBreaker1.kwikot", "VB_Kwikot"),
    brand("vacuumBreaker1.heatTech", "VB_HeatTech"),
    brand("vacuumBreaker1.techron", "VB_Techron"),
    text("pressureControlValve.size", "P_CValve"),
    brand("pressureControlValve.kwikot", "PCV_Kwikot"),
    brand("pressureControlValve.heatTech", "PCV_HeatTech"),
    brand("pressureControlValve.techron", "PCV_Techron"),
    text("nonReturnValve.size", "Non_return"),
    brand("nonReturnValve.kwikot", "NRV_Kwikot"),
    brand("nonReturnValve.heatTech", "NRV_HeatTech"),
    brand("nonReturnValve.techron", "NRV_Techron"),
    text("fogiPack.size", "Fogi_Pack"),
    text("extraItem1.name", "Extra_Item"),
    text("extraItem1.quantity", "Extra_ItemQty"),
    text("extraItem2.name", "Extra_Item2"),
    text("extraItem2.quantity", "Extra_ItemQty2"),
    FieldRule::Rows {
        key: "sundries",
        max: MAX_SUNDRIES,
        columns: &[
            ("name", "Sundries{n}"),
            ("qtyRequested", "SundriesQR{n}"),
            ("qtyUsed", "SundriesQU{n}"),
        ],
    },
    FieldRule::Rows {
        key: "additionalMaterials",
        max: MAX_ADDITIONAL_MATERIALS,
        columns: &[
            ("name", "Added{n}"),
            ("qtyRequested", "Added{n}_Req"),
            ("qtyUsed", "Added{n}_Used"),
        ],
    },
];

impl Template for MaterialList {
    fn kind(&self) -> FormKind {
        FormKind::MaterialList
    }

    fn file_name(&self) -> &'static str {
        "material-list.pdf"
    }

    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }
}
