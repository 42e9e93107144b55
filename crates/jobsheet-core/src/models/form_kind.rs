use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The closed set of form types the server can render to PDF.
///
/// The serialized identifiers are the `formId` values used by the client and
/// stored on submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FormKind {
    #[serde(rename = "form-absa-certificate")]
    Absa,
    #[serde(rename = "form-clearance-certificate")]
    Clearance,
    #[serde(rename = "form-sahl-certificate")]
    Sahl,
    #[serde(rename = "form-discovery-geyser")]
    Discovery,
    #[serde(rename = "form-liability-certificate")]
    Liability,
    #[serde(rename = "noncompliance-form")]
    NonCompliance,
    #[serde(rename = "material-list-form")]
    MaterialList,
}

impl FormKind {
    pub const ALL: [FormKind; 7] = [
        FormKind::Absa,
        FormKind::Clearance,
        FormKind::Sahl,
        FormKind::Discovery,
        FormKind::Liability,
        FormKind::NonCompliance,
        FormKind::MaterialList,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FormKind::Absa => "form-absa-certificate",
            FormKind::Clearance => "form-clearance-certificate",
            FormKind::Sahl => "form-sahl-certificate",
            FormKind::Discovery => "form-discovery-geyser",
            FormKind::Liability => "form-liability-certificate",
            FormKind::NonCompliance => "noncompliance-form",
            FormKind::MaterialList => "material-list-form",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FormKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| CoreError::UnsupportedFormType(s.to_string()))
    }
}
